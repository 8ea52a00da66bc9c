use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Package identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Margin configuration, every rate a fraction in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceConfig {
    pub service_margin: Decimal,
    pub product_margin: Decimal,
    pub sales_commission: Decimal,
    pub markup: Decimal,
}

impl PriceConfig {
    pub fn new(
        service_margin: Decimal,
        product_margin: Decimal,
        sales_commission: Decimal,
        markup: Decimal,
    ) -> Self {
        Self {
            service_margin,
            product_margin,
            sales_commission,
            markup,
        }
    }

    /// Margin applied to an item of the given utility type
    pub fn margin_for(&self, utility_type: UtilityType) -> Decimal {
        match utility_type {
            UtilityType::Service => self.service_margin,
            UtilityType::Product => self.product_margin,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("service_margin", self.service_margin),
            ("product_margin", self.product_margin),
            ("sales_commission", self.sales_commission),
            ("markup", self.markup),
        ];

        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(PricingError::InvalidMarginConfig(format!(
                    "{name} must be in [0, 1), got {rate}"
                )));
            }
        }

        Ok(())
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            service_margin: Decimal::new(30, 2),
            product_margin: Decimal::new(20, 2),
            sales_commission: Decimal::ZERO,
            markup: Decimal::ZERO,
        }
    }
}

/// Whether a line item is a service or a physical product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilityType {
    Service,
    Product,
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilityType::Service => write!(f, "service"),
            UtilityType::Product => write!(f, "product"),
        }
    }
}

/// How a catalog item is billed against the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingType {
    /// Scales with the event duration
    Hour,
    /// Flat fee
    Service,
}

impl BillingType {
    pub fn is_hourly(&self) -> bool {
        matches!(self, BillingType::Hour)
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingType::Hour => write!(f, "HOUR"),
            BillingType::Service => write!(f, "SERVICE"),
        }
    }
}

/// A bundled package as stored by the studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    /// Manually curated price; zero means unset
    #[serde(default)]
    pub personalized_price: Decimal,
    /// Event duration the personalized price was set for; zero or null means unset
    #[serde(default)]
    pub base_hours: Option<Decimal>,
}

impl Package {
    pub fn new(id: PackageId, personalized_price: Decimal, base_hours: Option<Decimal>) -> Self {
        Self {
            id,
            personalized_price,
            base_hours,
        }
    }

    pub fn has_personalized_price(&self) -> bool {
        self.personalized_price > Decimal::ZERO
    }
}

/// One service or product bundled in a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageLineItem {
    pub item_id: ItemId,
    pub quantity: u32,
    pub cost: Decimal,
    pub expense: Decimal,
    pub utility_type: UtilityType,
}

impl PackageLineItem {
    pub fn new(
        item_id: ItemId,
        quantity: u32,
        cost: Decimal,
        expense: Decimal,
        utility_type: UtilityType,
    ) -> Self {
        Self {
            item_id,
            quantity,
            cost,
            expense,
            utility_type,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(PricingError::InvalidInput(format!(
                "quantity for item {} must be at least 1",
                self.item_id
            )));
        }
        if self.cost < Decimal::ZERO {
            return Err(PricingError::InvalidInput(format!(
                "cost for item {} must not be negative, got {}",
                self.item_id, self.cost
            )));
        }
        if self.expense < Decimal::ZERO {
            return Err(PricingError::InvalidInput(format!(
                "expense for item {} must not be negative, got {}",
                self.item_id, self.expense
            )));
        }
        Ok(())
    }
}

/// Which source produced the final price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Personalized,
    Recalculated,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::Personalized => write!(f, "personalized"),
            PriceSource::Recalculated => write!(f, "recalculated"),
        }
    }
}

/// Priced line of a recalculated package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTotal {
    pub item_id: ItemId,
    pub billing_type: BillingType,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub multiplier: Decimal,
    pub total: Decimal,
}

/// Package price with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub final_price: Decimal,
    /// The package's personalized price, kept for audit even when unused
    pub base_price: Decimal,
    /// Pre-rounding recalculated total; absent when the personalized price was used
    pub recalculated_price: Option<Decimal>,
    pub hours_match: bool,
    pub price_source: PriceSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_totals: Vec<LineTotal>,
}

impl PriceResult {
    pub fn is_personalized(&self) -> bool {
        self.price_source == PriceSource::Personalized
    }
}

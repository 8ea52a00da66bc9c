use crate::domain::catalog::{BillingIndex, Catalog};
use crate::domain::hours::normalize_hours;
use crate::domain::margin::MarginPriceCalculator;
use crate::domain::types::{BillingType, LineTotal, PackageLineItem, PriceConfig};
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use tracing::trace;

/// Left-to-right sum of line totals
pub fn sum_line_totals(lines: &[LineTotal]) -> Result<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.total)
            .ok_or_else(|| PricingError::overflow("package total"))
    })
}

/// Bottom-up package price from line item cost, expense and margins
pub struct PackageLineItemPricer<'a, C: ?Sized> {
    calculator: &'a C,
}

impl<'a, C: MarginPriceCalculator + ?Sized> PackageLineItemPricer<'a, C> {
    pub fn new(calculator: &'a C) -> Self {
        Self { calculator }
    }

    /// Sum of all line totals, before any presentation rounding
    pub fn recalculate(
        &self,
        line_items: &[PackageLineItem],
        duration_hours: Option<Decimal>,
        catalog: &Catalog,
        config: &PriceConfig,
    ) -> Result<Decimal> {
        let index = BillingIndex::from_catalog(catalog);
        let lines = self.price_lines(line_items, duration_hours, &index, config)?;
        sum_line_totals(&lines)
    }

    /// Prices every line, failing on the first item that cannot be priced
    pub fn price_lines(
        &self,
        line_items: &[PackageLineItem],
        duration_hours: Option<Decimal>,
        index: &BillingIndex,
        config: &PriceConfig,
    ) -> Result<Vec<LineTotal>> {
        line_items
            .iter()
            .map(|item| self.price_line(item, duration_hours, index, config))
            .collect()
    }

    fn price_line(
        &self,
        item: &PackageLineItem,
        duration_hours: Option<Decimal>,
        index: &BillingIndex,
        config: &PriceConfig,
    ) -> Result<LineTotal> {
        item.validate()?;
        let billing_type = index.classify(&item.item_id)?;
        let unit_price = self
            .calculator
            .unit_price(item.cost, item.expense, item.utility_type, config)?;
        let multiplier = Self::multiplier(billing_type, duration_hours)?;

        let total = unit_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|subtotal| subtotal.checked_mul(multiplier))
            .ok_or_else(|| PricingError::overflow(format!("line total for {}", item.item_id)))?;

        trace!(
            item_id = %item.item_id,
            %billing_type,
            %unit_price,
            quantity = item.quantity,
            %multiplier,
            %total,
            "Priced line item"
        );

        Ok(LineTotal {
            item_id: item.item_id.clone(),
            billing_type,
            unit_price,
            quantity: item.quantity,
            multiplier,
            total,
        })
    }

    /// Hourly items scale with the event; an unset duration bills a single hour.
    fn multiplier(billing_type: BillingType, duration_hours: Option<Decimal>) -> Result<Decimal> {
        match billing_type {
            BillingType::Service => Ok(Decimal::ONE),
            BillingType::Hour => match normalize_hours(duration_hours) {
                Some(hours) if hours < Decimal::ZERO => Err(PricingError::InvalidInput(format!(
                    "event duration must not be negative, got {hours}"
                ))),
                Some(hours) => Ok(hours),
                None => Ok(Decimal::ONE),
            },
        }
    }
}

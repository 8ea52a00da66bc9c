use crate::domain::catalog::{BillingIndex, Catalog};
use crate::domain::hours::HoursMatchResolver;
use crate::domain::line_items::{sum_line_totals, PackageLineItemPricer};
use crate::domain::margin::{MarginPriceCalculator, StandardMarginCalculator};
use crate::domain::rounding::{PriceRounder, RoundingStrategy};
use crate::domain::types::{Package, PackageLineItem, PriceConfig, PriceResult, PriceSource};
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Reconciles a package's personalized price with a bottom-up recalculation.
///
/// The personalized price wins when it is set and either the package carries
/// no base-hours assumption or that assumption matches the event. Otherwise the
/// line items are repriced and the total is passed through the rounder.
///
/// The engine holds no per-call state; one instance can price any number of
/// packages concurrently.
pub struct PackagePriceEngine<C = StandardMarginCalculator, R = RoundingStrategy> {
    calculator: C,
    rounder: R,
}

impl PackagePriceEngine {
    /// Standard margin formula with charm rounding
    pub fn new() -> Self {
        Self::with_collaborators(StandardMarginCalculator, RoundingStrategy::Charm)
    }
}

impl Default for PackagePriceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MarginPriceCalculator, R: PriceRounder> PackagePriceEngine<C, R> {
    pub fn with_collaborators(calculator: C, rounder: R) -> Self {
        Self {
            calculator,
            rounder,
        }
    }

    pub fn price(
        &self,
        package: &Package,
        duration_hours: Option<Decimal>,
        line_items: &[PackageLineItem],
        catalog: &Catalog,
        config: &PriceConfig,
    ) -> Result<PriceResult> {
        if package.personalized_price < Decimal::ZERO {
            return Err(PricingError::InvalidInput(format!(
                "personalized price for package {} must not be negative, got {}",
                package.id, package.personalized_price
            )));
        }

        let hours = HoursMatchResolver::resolve(package.base_hours, duration_hours);

        if package.has_personalized_price() && hours.permits_personalized() {
            debug!(
                package_id = %package.id,
                constraint_set = hours.constraint_set,
                hours_match = hours.hours_match,
                price_source = %PriceSource::Personalized,
                "Using personalized package price"
            );

            return Ok(PriceResult {
                final_price: package.personalized_price,
                base_price: package.personalized_price,
                recalculated_price: None,
                hours_match: hours.hours_match,
                price_source: PriceSource::Personalized,
                line_totals: Vec::new(),
            });
        }

        let index = BillingIndex::from_catalog(catalog);
        let pricer = PackageLineItemPricer::new(&self.calculator);
        let line_totals = pricer.price_lines(line_items, duration_hours, &index, config)?;
        let recalculated = sum_line_totals(&line_totals)?;
        let final_price = self.rounder.round(recalculated)?;

        debug!(
            package_id = %package.id,
            constraint_set = hours.constraint_set,
            hours_match = hours.hours_match,
            price_source = %PriceSource::Recalculated,
            %recalculated,
            %final_price,
            lines = line_totals.len(),
            "Recalculated package price"
        );

        Ok(PriceResult {
            final_price,
            base_price: package.personalized_price,
            recalculated_price: Some(recalculated),
            hours_match: hours.hours_match,
            price_source: PriceSource::Recalculated,
            line_totals,
        })
    }
}

use crate::domain::types::{PriceConfig, UtilityType};
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;

/// Turns an item's cost and expense into a unit sale price.
///
/// Implementations must be deterministic and side-effect free, and must never
/// return a negative price for non-negative inputs.
#[cfg_attr(test, mockall::automock)]
pub trait MarginPriceCalculator: Send + Sync {
    fn unit_price(
        &self,
        cost: Decimal,
        expense: Decimal,
        utility_type: UtilityType,
        config: &PriceConfig,
    ) -> Result<Decimal>;
}

/// Default studio margin formula.
///
/// `(cost + expense) * (1 + margin) * (1 + markup) / (1 - sales_commission)`,
/// where `margin` is the service or product margin depending on the item.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMarginCalculator;

impl MarginPriceCalculator for StandardMarginCalculator {
    fn unit_price(
        &self,
        cost: Decimal,
        expense: Decimal,
        utility_type: UtilityType,
        config: &PriceConfig,
    ) -> Result<Decimal> {
        config.validate()?;
        if cost < Decimal::ZERO || expense < Decimal::ZERO {
            return Err(PricingError::InvalidInput(format!(
                "cost and expense must not be negative, got {cost} and {expense}"
            )));
        }

        let subtotal = cost
            .checked_add(expense)
            .ok_or_else(|| PricingError::overflow("item subtotal"))?;
        let with_margin = subtotal
            .checked_mul(Decimal::ONE + config.margin_for(utility_type))
            .ok_or_else(|| PricingError::overflow("item margin"))?;
        let with_markup = with_margin
            .checked_mul(Decimal::ONE + config.markup)
            .ok_or_else(|| PricingError::overflow("item markup"))?;

        // validate() keeps the commission below one
        with_markup
            .checked_div(Decimal::ONE - config.sales_commission)
            .ok_or_else(|| PricingError::overflow("sales commission"))
    }
}

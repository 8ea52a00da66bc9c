use crate::error::{PricingError, Result};
use rust_decimal::{Decimal, RoundingStrategy as DecimalRounding};
use serde::{Deserialize, Serialize};

/// Presentation rounding applied to recalculated prices.
///
/// Implementations must be deterministic and idempotent: rounding an already
/// rounded price returns it unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait PriceRounder: Send + Sync {
    fn round(&self, price: Decimal) -> Result<Decimal>;
}

/// Named rounding policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundingStrategy {
    /// Round up to a tiered step: units below 100, tens below 1000, hundreds above
    #[default]
    Charm,
    /// Leave the price untouched
    None,
    /// Round half away from zero to the nearest multiple of `step`
    NearestN { step: Decimal },
}

/// Charm tiers as `(upper bound, step)`; prices at or above the last bound use `CHARM_TOP_STEP`.
///
/// Each bound must be a multiple of the next tier's step for rounding to stay idempotent.
const CHARM_TIERS: [(i64, i64); 2] = [(100, 1), (1000, 10)];
const CHARM_TOP_STEP: i64 = 100;

impl RoundingStrategy {
    pub fn validate(&self) -> Result<()> {
        match self {
            RoundingStrategy::NearestN { step } if *step <= Decimal::ZERO => Err(
                PricingError::InvalidRounding(format!("step must be positive, got {step}")),
            ),
            _ => Ok(()),
        }
    }

    fn charm_step(price: Decimal) -> Decimal {
        CHARM_TIERS
            .iter()
            .find(|(bound, _)| price < Decimal::from(*bound))
            .map(|(_, step)| Decimal::from(*step))
            .unwrap_or_else(|| Decimal::from(CHARM_TOP_STEP))
    }

    fn to_step(price: Decimal, step: Decimal, mode: DecimalRounding) -> Result<Decimal> {
        let units = price
            .checked_div(step)
            .ok_or_else(|| PricingError::overflow("rounding"))?
            .round_dp_with_strategy(0, mode);
        units
            .checked_mul(step)
            .map(|rounded| rounded.normalize())
            .ok_or_else(|| PricingError::overflow("rounding"))
    }
}

impl PriceRounder for RoundingStrategy {
    fn round(&self, price: Decimal) -> Result<Decimal> {
        if price < Decimal::ZERO {
            return Err(PricingError::InvalidRounding(format!(
                "cannot round negative price {price}"
            )));
        }

        match self {
            RoundingStrategy::Charm => {
                Self::to_step(price, Self::charm_step(price), DecimalRounding::AwayFromZero)
            }
            RoundingStrategy::None => Ok(price),
            RoundingStrategy::NearestN { step } => {
                self.validate()?;
                Self::to_step(price, *step, DecimalRounding::MidpointAwayFromZero)
            }
        }
    }
}

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod quote;

pub use config::PricingConfig;
pub use domain::{PackagePriceEngine, PriceResult};
pub use error::{PricingError, Result};
pub use quote::QuoteRequest;

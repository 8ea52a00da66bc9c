use crate::config::PricingConfig;
use crate::domain::{
    Catalog, MarginPriceCalculator, Package, PackageLineItem, PackagePriceEngine, PriceConfig,
    PriceResult, PriceRounder,
};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Everything needed to price one package for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub package: Package,
    #[serde(default)]
    pub duration_hours: Option<Decimal>,
    #[serde(default)]
    pub line_items: Vec<PackageLineItem>,
    #[serde(default)]
    pub catalog: Catalog,
    /// Overrides the configured default margins
    #[serde(default)]
    pub margins: Option<PriceConfig>,
}

impl QuoteRequest {
    /// Reads a request from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quote request {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON quote request {}", path.display())),
            Some("toml") => toml::from_str(&raw)
                .with_context(|| format!("Invalid TOML quote request {}", path.display())),
            other => bail!(
                "Unsupported quote request format {:?}, expected .json or .toml",
                other.unwrap_or("")
            ),
        }
    }

    pub fn effective_margins(&self, config: &PricingConfig) -> PriceConfig {
        self.margins.unwrap_or(config.margins)
    }

    pub fn evaluate<C, R>(
        &self,
        engine: &PackagePriceEngine<C, R>,
        config: &PricingConfig,
    ) -> Result<PriceResult>
    where
        C: MarginPriceCalculator,
        R: PriceRounder,
    {
        let margins = self.effective_margins(config);
        let result = engine
            .price(
                &self.package,
                self.duration_hours,
                &self.line_items,
                &self.catalog,
                &margins,
            )
            .with_context(|| format!("Unable to compute price for package {}", self.package.id))?;

        info!(
            package_id = %self.package.id,
            price_source = %result.price_source,
            final_price = %result.final_price,
            "Quote priced"
        );

        Ok(result)
    }
}

use crate::domain::{PriceConfig, RoundingStrategy};
use anyhow::{anyhow, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "studio-pricing.toml";
pub const ENV_PREFIX: &str = "STUDIO_PRICING_";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when neither -v/-q nor RUST_LOG are given
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "studio_pricing=info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Margins applied when a quote request carries none of its own
    pub margins: PriceConfig,
    pub rounding: RoundingStrategy,
    pub logging: LoggingConfig,
}

impl PricingConfig {
    /// Defaults, then the TOML file, then `STUDIO_PRICING_*` variables.
    ///
    /// Nested keys use a double underscore, e.g. `STUDIO_PRICING_MARGINS__MARKUP=0.1`.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(PricingConfig::default()));

        match path_override {
            Some(path) if path.exists() => {
                figment = figment.merge(Toml::file(&path));
            }
            Some(path) => {
                return Err(anyhow!("Configuration file not found: {}", path.display()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        // STUDIO_PRICING_CONFIG names the file itself, not a setting
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]));

        let config: PricingConfig = figment
            .extract()
            .map_err(|e| anyhow!("Configuration error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.margins.validate()?;
        self.rounding.validate()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

//! # Engine Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHADE_INITIAL_TAB=k2-tab                                           │
//! │     SHADE_DEFAULT_PRODUCT=rollerBlind                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shade-quote/shade.toml (Linux)                           │
//! │     ~/Library/Application Support/com.shade.quote/shade.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [ui]
//! initial_tab = "k1-tab"
//!
//! [quote]
//! default_product = "rollerBlind"
//!
//! [limits]
//! max_accessory_count = 99
//! max_location_len = 20
//!
//! [pricing]
//! fabric_per_sqm_cents = 8500
//! motor_cents = 25000
//!
//! [logging]
//! filter = "info,shade=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shade_core::validation::EditLimits;
use shade_core::{TabId, DEFAULT_PRODUCT_KEY, MAX_ACCESSORY_COUNT};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Tab shown at startup and after a new quote.
    #[serde(default)]
    pub initial_tab: TabId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Product key used when no starting quote is supplied.
    #[serde(default = "default_product")]
    pub default_product: String,
}

fn default_product() -> String {
    DEFAULT_PRODUCT_KEY.to_string()
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            default_product: default_product(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSettings {
    #[serde(default = "default_max_accessory_count")]
    pub max_accessory_count: u32,

    #[serde(default = "default_max_location_len")]
    pub max_location_len: usize,
}

fn default_max_accessory_count() -> u32 {
    EditLimits::default().max_accessory_count
}

fn default_max_location_len() -> usize {
    EditLimits::default().max_location_len
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings {
            max_accessory_count: default_max_accessory_count(),
            max_location_len: default_max_location_len(),
        }
    }
}

impl LimitSettings {
    pub fn edit_limits(&self) -> EditLimits {
        EditLimits {
            max_location_len: self.max_location_len,
            max_accessory_count: self.max_accessory_count,
        }
    }
}

/// Unit prices for the flat-rate price list, in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub fabric_per_sqm_cents: i64,
    pub winder_cents: i64,
    pub motor_cents: i64,
    pub remote_cents: i64,
    pub charger_cents: i64,
    pub cord_cents: i64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            fabric_per_sqm_cents: 8_500,
            winder_cents: 3_000,
            motor_cents: 25_000,
            remote_cents: 7_000,
            charger_cents: 4_500,
            cord_cents: 1_500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive. `RUST_LOG` wins over this.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,shade=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub quote: QuoteSettings,

    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl EngineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shade.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> EngineResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> EngineResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.quote.default_product.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "quote.default_product must not be empty".into(),
            ));
        }

        if self.limits.max_accessory_count > MAX_ACCESSORY_COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "limits.max_accessory_count must be at most {}",
                MAX_ACCESSORY_COUNT
            )));
        }

        if self.limits.max_location_len == 0 {
            return Err(EngineError::InvalidConfig(
                "limits.max_location_len must be greater than 0".into(),
            ));
        }

        let p = &self.pricing;
        let prices = [
            p.fabric_per_sqm_cents,
            p.winder_cents,
            p.motor_cents,
            p.remote_cents,
            p.charger_cents,
            p.cord_cents,
        ];
        if prices.iter().any(|&c| c < 0) {
            return Err(EngineError::InvalidConfig("prices must not be negative".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(tab) = std::env::var("SHADE_INITIAL_TAB") {
            match tab.parse() {
                Ok(parsed) => {
                    debug!(tab = %tab, "Overriding initial tab from environment");
                    self.ui.initial_tab = parsed;
                }
                Err(_) => warn!(tab = %tab, "Unknown tab in environment"),
            }
        }

        if let Ok(product) = std::env::var("SHADE_DEFAULT_PRODUCT") {
            debug!(product = %product, "Overriding default product from environment");
            self.quote.default_product = product;
        }

        if let Ok(max) = std::env::var("SHADE_MAX_ACCESSORY_COUNT") {
            if let Ok(n) = max.parse::<u32>() {
                self.limits.max_accessory_count = n;
            }
        }

        if let Ok(max) = std::env::var("SHADE_MAX_LOCATION_LEN") {
            if let Ok(n) = max.parse::<usize>() {
                self.limits.max_location_len = n;
            }
        }

        if let Ok(filter) = std::env::var("SHADE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shade", "quote")
            .map(|dirs| dirs.config_dir().join("shade.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.ui.initial_tab, TabId::K1);
        assert_eq!(config.quote.default_product, DEFAULT_PRODUCT_KEY);
        assert_eq!(config.logging.filter, "info,shade=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_limits_match_store_limits() {
        assert_eq!(LimitSettings::default().edit_limits(), EditLimits::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
            [ui]
            initial_tab = "k3-tab"

            [pricing]
            motor_cents = 30000
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.initial_tab, TabId::K3);
        assert_eq!(config.pricing.motor_cents, 30_000);
        assert_eq!(config.pricing.remote_cents, PricingSettings::default().remote_cents);
        assert_eq!(config.limits, LimitSettings::default());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = EngineConfig::default();
        config.limits.max_accessory_count = MAX_ACCESSORY_COUNT + 1;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.pricing.cord_cents = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("shade-quote-missing-config.toml");
        let config = EngineConfig::load_or_default(Some(path));
        assert_eq!(config.quote.default_product, DEFAULT_PRODUCT_KEY);
    }
}

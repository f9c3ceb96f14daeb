//! CLI configuration.

use anyhow::{Context, Result};
use gate_store::{DEFAULT_DATA_FILE, DEFAULT_TIER_SWAP_DEBOUNCE};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["gatequote.toml", ".gatequote.toml", "gatequote.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where customer data is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Data file, relative to the config file's directory.
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_data_path() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Pricing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Surcharge for new gates, in percent.
    #[serde(default)]
    pub default_surcharge_percent: f64,

    /// Quiet period after a dimension edit before the main tier is swapped.
    #[serde(default = "default_debounce_ms")]
    pub tier_swap_debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_TIER_SWAP_DEBOUNCE.as_millis() as u64
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_surcharge_percent: 0.0,
            tier_swap_debounce_ms: default_debounce_ms(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in price list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Generate a default gatequote.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Gate quotation configuration

[storage]
path = "{data_file}"

[pricing]
default_surcharge_percent = 0.0
tier_swap_debounce_ms = {debounce}

[catalog]
# path = "catalog.toml"
"#,
        data_file = DEFAULT_DATA_FILE,
        debounce = default_debounce_ms(),
    )
}

//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Document numbering configuration.
    #[serde(default)]
    pub numbering: NumberingConfig,
    /// Document lifecycle configuration.
    #[serde(default)]
    pub documents: DocumentConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Numbering configuration.
///
/// Quotes and invoices use independent yearly counters keyed by these prefixes.
#[derive(Debug, Clone, Deserialize)]
pub struct NumberingConfig {
    /// Prefix for quote numbers (`DEV-2024-001`).
    #[serde(default = "default_quote_prefix")]
    pub quote_prefix: String,
    /// Prefix for invoice numbers (`FAC-2024-001`).
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            quote_prefix: default_quote_prefix(),
            invoice_prefix: default_invoice_prefix(),
        }
    }
}

fn default_quote_prefix() -> String {
    "DEV".to_string()
}

fn default_invoice_prefix() -> String {
    "FAC".to_string()
}

/// Document lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    /// Days added to the issue date for quote expiry and invoice due dates.
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
    /// Quotes expiring within this many days are flagged as expiring soon.
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: u32,
    /// Re-derive payment status whenever an invoice is saved through the edit path.
    #[serde(default = "default_reconcile_on_save")]
    pub reconcile_on_save: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
            expiry_warning_days: default_expiry_warning_days(),
            reconcile_on_save: default_reconcile_on_save(),
        }
    }
}

fn default_validity_days() -> u32 {
    30
}

fn default_expiry_warning_days() -> u32 {
    7
}

fn default_reconcile_on_save() -> bool {
    true
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FACTURA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

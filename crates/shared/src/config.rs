//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger store configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Report export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Ledger store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path to the SQLite ledger database.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("ledger.db")
}

/// Report export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory report CSV files are written to.
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    /// Decimal places amounts are rounded to; `None` keeps full precision.
    #[serde(default)]
    pub decimal_places: Option<u32>,
    /// Render zero amounts as empty cells.
    #[serde(default)]
    pub zero_as_blank: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            decimal_places: None,
            zero_as_blank: false,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TALLY__SECTION__KEY` environment variables.
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
                config::Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Run configuration, read from the `[settings]` table of `config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Every key except `browser_debug_port` is required; a missing key is a
/// fatal startup error.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the workbook holding the transaction table.
    pub input_file: String,
    /// Named table to extract from the workbook's active sheet.
    pub table_name: String,
    pub user: String,
    pub password: String,
    pub signin_url: String,
    /// Entry form page the records are transcribed into.
    pub input_url: String,
    /// Locator of the wallet option to pick for every record.
    pub wallet_xpath: String,
    /// Devtools port of the already-running browser.
    #[serde(default = "default_browser_debug_port")]
    pub browser_debug_port: u16,
}

fn default_browser_debug_port() -> u16 {
    9222
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    settings: Config,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(file.settings)
    }
}

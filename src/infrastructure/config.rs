//! Configuration for the stock sync pipeline
//!
//! Tunables live in an optional JSON config file with sensible defaults;
//! credentials only ever come from the environment (`LOGIN_USERNAME`,
//! `LOGIN_PASSWORD`, `WC_URL`, `WC_CONSUMER_KEY`, `WC_CONSUMER_SECRET`) so
//! they never end up in a file that gets committed or copied around.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::infrastructure::http_client::HttpClientConfig;

/// Default config file path, next to the working directory's input files.
pub const DEFAULT_CONFIG_PATH: &str = "stock-sync.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storefront scraping settings
    pub storefront: StorefrontConfig,

    /// WooCommerce push settings
    pub woocommerce: WooConfig,

    /// Input/checkpoint file locations
    pub files: FileConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Storefront scraping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Shared HTTP client settings (user agent, timeout, request rate)
    pub http: HttpClientConfig,

    /// Extra delay between product pages in milliseconds, on top of the
    /// client's rate limiter
    pub request_delay_ms: u64,

    /// Log a progress line every N scraped products
    pub progress_every: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            request_delay_ms: 2000,
            progress_every: 25,
        }
    }
}

/// WooCommerce push settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WooConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum in-flight stock updates
    pub max_concurrent_updates: usize,
}

impl Default for WooConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_concurrent_updates: 10,
        }
    }
}

/// Input/checkpoint file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Catalog CSV with "Style Code" / "EAN Code" columns
    pub input_csv: PathBuf,

    /// JSON checkpoint file (scrape results + push flags)
    pub checkpoint: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from("style_codes.csv"),
            checkpoint: PathBuf::from("product_data.json"),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files when file output is enabled
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// With an explicit path the file must exist; without one, the default
    /// path is used when present and built-in defaults otherwise.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read_file(path).await,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::read_file(default).await
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    async fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Storefront login credentials, environment-only.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            username: required_env("LOGIN_USERNAME")?,
            password: required_env("LOGIN_PASSWORD")?,
        })
    }
}

/// WooCommerce API credentials, environment-only.
#[derive(Debug, Clone)]
pub struct WooCredentials {
    pub url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl WooCredentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: required_env("WC_URL")?,
            consumer_key: required_env("WC_CONSUMER_KEY")?,
            consumer_secret: required_env("WC_CONSUMER_SECRET")?,
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    let value = env::var(name)
        .with_context(|| format!("Environment variable {name} is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Environment variable {name} is empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_file_layout() {
        let config = AppConfig::default();
        assert_eq!(config.files.input_csv, PathBuf::from("style_codes.csv"));
        assert_eq!(config.files.checkpoint, PathBuf::from("product_data.json"));
        assert_eq!(config.woocommerce.max_concurrent_updates, 10);
        assert_eq!(config.storefront.request_delay_ms, 2000);
    }

    #[tokio::test]
    async fn partial_config_file_keeps_defaults_for_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock-sync.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"woocommerce": {{"max_concurrent_updates": 4}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.woocommerce.max_concurrent_updates, 4);
        assert_eq!(config.woocommerce.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn explicit_missing_config_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/config.json"))).await;
        assert!(result.is_err());
    }

    // Each test owns a uniquely named variable so parallel test runs never
    // mutate the same process-wide state.
    #[test]
    fn required_env_rejects_blank_values() {
        env::set_var("STOCK_SYNC_TEST_BLANK", "  ");
        assert!(required_env("STOCK_SYNC_TEST_BLANK").is_err());
    }

    #[test]
    fn required_env_rejects_missing_values() {
        assert!(required_env("STOCK_SYNC_TEST_UNSET").is_err());
    }
}

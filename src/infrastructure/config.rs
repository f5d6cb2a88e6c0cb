use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_request_timeout() -> u64 {
  10
}

fn default_include_mapped_in_general() -> bool {
  true
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub backend: BackendConfig,
  #[serde(default)]
  pub draft: DraftConfig,
}

/// Validation backend endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
  pub base_url: String,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_seconds: u64,
}

/// Draft building and reconciliation behavior
#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
  /// Substitute demo placeholders for blank fields instead of passing
  /// empty strings through to the backend.
  #[serde(default)]
  pub fill_placeholders: bool,
  /// Append mapped error strings to the general list as well. Deployed
  /// variants disagree on this; the additive behavior is the default.
  #[serde(default = "default_include_mapped_in_general")]
  pub include_mapped_in_general: bool,
}

impl Default for DraftConfig {
  fn default() -> Self {
    Self {
      fill_placeholders: false,
      include_mapped_in_general: true,
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. Environment variables with XBILL_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the XBILL_ prefix and are separated by double underscores:
  /// - `XBILL_BACKEND__BASE_URL=http://localhost:8000`
  /// - `XBILL_BACKEND__REQUEST_TIMEOUT_SECONDS=10`
  /// - `XBILL_DRAFT__FILL_PLACEHOLDERS=true`
  /// - `XBILL_DRAFT__INCLUDE_MAPPED_IN_GENERAL=false`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      // Start with default configuration
      .add_source(File::with_name("config/default").required(true))
      // Add optional local configuration (for local development overrides)
      .add_source(File::with_name("config/local").required(false))
      // Add optional environment-specific configuration
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Add environment variables with XBILL_ prefix
      // Use double underscore as separator: XBILL_BACKEND__BASE_URL=...
      .add_source(
        Environment::with_prefix("XBILL")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

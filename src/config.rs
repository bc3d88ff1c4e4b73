//! Loading app configuration (custom word bank + placeholder title) from TOML.
//!
//! See `AppConfig` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  /// Optional replacement word bank. When present and sane it replaces the
  /// built-in catalog entirely.
  #[serde(default)]
  pub words: Vec<String>,
  /// Title used when the user saves a story without one.
  #[serde(default)]
  pub untitled_label: Option<String>,
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "story40_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "story40_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "story40_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

//! Configuration loading.
//!
//! A config declares an output directory and a list of targets, each mapping
//! a set of input files to one output file. Configs are written either as a
//! Lua chunk returning a table (`reduce.config.lua`) or as JSON.
//!
//! # Submodules
//!
//! - [`lua`] - Lua evaluation of config files
//! - `types` - Config, target and input types plus validation

pub mod lua;
mod types;

pub use types::*;

use std::path::Path;

use tracing::{debug, info};

/// Errors raised while loading or validating a config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("unsupported config format '{extension}' for {path} (expected .lua or .json)")]
  UnsupportedFormat { path: String, extension: String },

  #[error("lua error in {path}: {message}")]
  Lua { path: String, message: String },

  #[error("invalid json in {path}: {source}")]
  Json {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// Malformed config or missing required fields.
  #[error("invalid config: {message}")]
  Invalid { message: String },
}

impl ConfigError {
  pub fn invalid(message: impl Into<String>) -> Self {
    ConfigError::Invalid {
      message: message.into(),
    }
  }
}

/// Load, resolve and validate a config file.
///
/// The format is chosen by extension. Relative paths are resolved against the
/// directory containing the file (or its declared `base_dir`), and
/// `REDUCE_OUTPUT_DIR` is applied before validation.
pub fn load_config(path: &Path) -> Result<ReduceConfig, ConfigError> {
  let path_str = path.display().to_string();

  let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path_str.clone(),
    source,
  })?;

  let absolute = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
  let config_dir = absolute.parent().unwrap_or(Path::new(".")).to_path_buf();

  let extension = path
    .extension()
    .map(|e| e.to_string_lossy().to_lowercase())
    .unwrap_or_default();

  let file = match extension.as_str() {
    "lua" => lua::eval_config(&absolute, &source, &config_dir)?,
    "json" => parse_json(&path_str, &source)?,
    _ => {
      return Err(ConfigError::UnsupportedFormat {
        path: path_str,
        extension,
      });
    }
  };

  let mut config = ReduceConfig::from_file(file, &config_dir);
  config.apply_env_overrides();
  config.validate()?;

  info!(
    path = %path_str,
    targets = config.targets.len(),
    output = %config.output_path().display(),
    "config loaded"
  );

  Ok(config)
}

fn parse_json(path: &str, source: &str) -> Result<ConfigFile, ConfigError> {
  let value: serde_json::Value = serde_json::from_str(source).map_err(|source| ConfigError::Json {
    path: path.to_string(),
    source,
  })?;
  debug!(path, "json config parsed");

  serde_json::from_value(value).map_err(|e| ConfigError::invalid(format!("{}: {}", path, e)))
}

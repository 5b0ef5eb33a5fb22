//! Crate-wide constants.

pub const APP_NAME: &str = "reduce";

/// Config file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "reduce.config.lua";

/// Output directory used when a config does not declare one.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Environment variable that replaces the configured output directory.
pub const OUTPUT_DIR_ENV: &str = "REDUCE_OUTPUT_DIR";

/// Config file extensions understood by [`crate::config::load_config`].
pub const CONFIG_EXTENSIONS: &[&str] = &["lua", "json"];

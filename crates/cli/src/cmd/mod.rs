mod build;
mod check;
mod info;
mod plan;
mod verify;

pub use build::cmd_build;
pub use check::cmd_check;
pub use info::cmd_info;
pub use plan::cmd_plan;
pub use verify::cmd_verify;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use reduce_lib::config::{ReduceConfig, load_config};

/// Load a config and apply the `--out-dir` override, if any.
///
/// A relative override is taken relative to the current directory, not the
/// config's base directory.
fn load_with_override(config_path: &Path, out_dir: Option<&Path>) -> Result<ReduceConfig> {
  let mut config =
    load_config(config_path).with_context(|| format!("Failed to load config: {}", config_path.display()))?;

  if let Some(dir) = out_dir {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    config.output_dir = cwd.join(dir);
    debug!(output_dir = %config.output_dir.display(), "output directory overridden");
  }

  Ok(config)
}

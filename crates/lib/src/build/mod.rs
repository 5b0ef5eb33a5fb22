//! The build runner.
//!
//! A build turns a [`ReduceConfig`] into files under its output directory.
//! It runs in three steps:
//!
//! 1. [`plan_build`] expands inputs and validates paths without touching disk
//! 2. [`clean_output_dir`] deletes and recreates the output directory
//! 3. [`execute_plan`] bundles every target and writes the results
//!
//! [`reduce`] runs all three. Output bytes depend only on the sources and the
//! config, so running it twice yields identical directories.
//!
//! # Submodules
//!
//! - [`bundle`] - The [`bundle::Bundler`] trait and its implementations
//! - [`execute`] - Cleaning and writing
//! - [`plan`] - Input resolution

pub mod bundle;
pub mod execute;
pub mod plan;
mod types;

pub use execute::{clean_output_dir, execute_plan};
pub use plan::plan_build;
pub use types::*;

use tracing::info;

use crate::config::ReduceConfig;

/// Build every target of `config` into a fresh output directory.
///
/// Config and input errors are raised before the output directory is
/// touched. On success every output has been synced to disk.
pub async fn reduce(config: &ReduceConfig) -> Result<BuildReport, BuildError> {
  let plan = plan_build(config)?;

  info!(
    targets = plan.targets.len(),
    sources = plan.source_count(),
    output = %plan.output_dir.display(),
    "starting build"
  );

  clean_output_dir(&plan.output_dir).await?;
  let report = execute_plan(&plan).await?;

  info!(
    outputs = report.outputs.len(),
    bytes = report.total_bytes(),
    tree_hash = %report.tree_hash.short(12),
    "build complete"
  );

  Ok(report)
}

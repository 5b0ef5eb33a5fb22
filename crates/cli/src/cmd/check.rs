//! Implementation of the `reduce check` command.
//!
//! Builds a config and compares the fresh output against a golden directory.

use std::path::Path;

use anyhow::{Context, Result, bail};

use reduce_lib::ReduceError;
use reduce_lib::check::check;
use reduce_lib::verify::PatternSet;

use crate::output::{OutputFormat, print_comparison, print_json, print_success};

pub fn cmd_check(
  config_path: &Path,
  expected: &Path,
  patterns: &[String],
  out_dir: Option<&Path>,
  verbose: bool,
  format: OutputFormat,
) -> Result<()> {
  let config = super::load_with_override(config_path, out_dir)?;
  let pattern_set = PatternSet::new(patterns).context("Invalid pattern")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  match rt.block_on(check(&config, expected, &pattern_set)) {
    Ok(outcome) => {
      if format.is_json() {
        print_json(&outcome)?;
      } else {
        print_success(&format!("Built {} file(s)", outcome.build.outputs.len()));
        print_comparison(&outcome.comparison, verbose);
      }
      Ok(())
    }
    Err(ReduceError::ComparisonMismatch(comparison)) => {
      if format.is_json() {
        print_json(&comparison)?;
      } else {
        print_comparison(&comparison, verbose);
      }
      bail!(
        "build output does not match {} ({} mismatch(es))",
        expected.display(),
        comparison.mismatches.len()
      );
    }
    Err(e) => Err(e).context("Check failed"),
  }
}

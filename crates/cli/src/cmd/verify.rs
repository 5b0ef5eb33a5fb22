//! Implementation of the `reduce verify` command.
//!
//! Compares two directories and fails when any selected file differs.

use std::path::Path;

use anyhow::{Context, Result, bail};

use reduce_lib::verify::{PatternSet, compare_directories};

use crate::output::{OutputFormat, print_comparison, print_json, print_warning};

pub fn cmd_verify(
  actual: &Path,
  expected: &Path,
  patterns: &[String],
  verbose: bool,
  format: OutputFormat,
) -> Result<()> {
  let pattern_set = PatternSet::new(patterns).context("Invalid pattern")?;
  if pattern_set.is_empty() && !format.is_json() {
    print_warning("No patterns given, comparing all files");
  }

  let comparison = compare_directories(actual, expected, &pattern_set)
    .with_context(|| format!("Failed to compare {} with {}", actual.display(), expected.display()))?;

  if format.is_json() {
    print_json(&comparison)?;
  } else {
    print_comparison(&comparison, verbose);
  }

  if !comparison.is_match() {
    bail!(
      "{} does not match {} ({} mismatch(es))",
      actual.display(),
      expected.display(),
      comparison.mismatches.len()
    );
  }

  Ok(())
}

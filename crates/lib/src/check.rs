//! Build-then-verify.
//!
//! Mirrors how fixtures are tested: wipe the output directory, build, and
//! compare the result against a golden directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::build::plan::normalize;
use crate::build::{BuildReport, reduce};
use crate::config::{ConfigError, ReduceConfig};
use crate::error::ReduceError;
use crate::verify::{Comparison, PatternSet, compare_directories};

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
  pub build: BuildReport,
  pub comparison: Comparison,
}

/// Build `config` and compare its output directory against `expected`.
///
/// Fails with [`ReduceError::ComparisonMismatch`] when any file selected by
/// `patterns` differs, and with [`ConfigError::Invalid`] before building when
/// `expected` is the output directory or lies inside it.
pub async fn check(config: &ReduceConfig, expected: &Path, patterns: &PatternSet) -> Result<CheckOutcome, ReduceError> {
  let output_dir = normalize(&config.output_path());
  let expected_dir = resolve_dir(expected);
  if expected_dir.starts_with(&output_dir) {
    return Err(
      ConfigError::invalid(format!(
        "expected directory {} lies inside the output directory {}, which is cleaned before building",
        expected_dir.display(),
        output_dir.display()
      ))
      .into(),
    );
  }

  let build = reduce(config).await?;

  info!(
    actual = %build.output_dir.display(),
    expected = %expected.display(),
    patterns = ?patterns.as_strs(),
    "verifying build output"
  );

  let comparison = compare_directories(&build.output_dir, expected, patterns)?.into_result()?;

  Ok(CheckOutcome { build, comparison })
}

/// Absolute, symlink-free form of `path` when it exists, else its lexical
/// absolute form.
fn resolve_dir(path: &Path) -> PathBuf {
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .map(|p| normalize(&p))
    .unwrap_or_else(|_| path.to_path_buf())
}

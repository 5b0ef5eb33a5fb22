//! Crate-level error type.

use thiserror::Error;

use crate::build::BuildError;
use crate::config::ConfigError;
use crate::verify::{Comparison, VerifyError};

#[derive(Debug, Error)]
pub enum ReduceError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Verify(#[from] VerifyError),

  /// The built tree differs from the expected tree.
  #[error("output does not match expected directory: {0}")]
  ComparisonMismatch(Comparison),
}

impl ReduceError {
  /// The comparison behind a mismatch, if that is what this error is.
  pub fn comparison(&self) -> Option<&Comparison> {
    match self {
      ReduceError::ComparisonMismatch(comparison) => Some(comparison),
      _ => None,
    }
  }
}

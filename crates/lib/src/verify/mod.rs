//! Directory verification.
//!
//! Compares a built directory against a fixture directory, restricted to a
//! set of glob patterns, and reports every difference by relative path.

mod compare;
mod pattern;

pub use compare::compare_directories;
pub use pattern::PatternSet;

use serde::Serialize;

use crate::error::ReduceError;
use crate::util::hash::{ContentHash, HashError};

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
  #[error("invalid pattern '{pattern}': {message}")]
  InvalidPattern { pattern: String, message: String },

  #[error("directory not found: {path}")]
  MissingRoot { path: String },

  #[error("failed to walk {path}: {message}")]
  Walk { path: String, message: String },

  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Hash(#[from] HashError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
  /// Present in the expected tree only.
  MissingInActual,
  /// Present in the actual tree only.
  MissingInExpected,
  ContentMismatch {
    expected: ContentHash,
    actual: ContentHash,
    /// Byte offset of the first differing byte.
    first_difference: u64,
  },
}

impl MismatchKind {
  pub fn label(&self) -> &'static str {
    match self {
      MismatchKind::MissingInActual => "missing in actual",
      MismatchKind::MissingInExpected => "missing in expected",
      MismatchKind::ContentMismatch { .. } => "content mismatch",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
  pub path: String,
  #[serde(flatten)]
  pub kind: MismatchKind,
}

impl std::fmt::Display for Mismatch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.kind {
      MismatchKind::ContentMismatch { first_difference, .. } => {
        write!(f, "{}: {} at byte {}", self.path, self.kind.label(), first_difference)
      }
      kind => write!(f, "{}: {}", self.path, kind.label()),
    }
  }
}

/// Outcome of a directory comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
  /// Relative paths whose contents are identical in both trees.
  pub matched: Vec<String>,
  /// Every divergence, sorted by path.
  pub mismatches: Vec<Mismatch>,
}

impl Comparison {
  pub fn is_match(&self) -> bool {
    self.mismatches.is_empty()
  }

  /// `Err(ReduceError::ComparisonMismatch)` unless the trees matched.
  pub fn into_result(self) -> Result<Comparison, ReduceError> {
    if self.is_match() {
      Ok(self)
    } else {
      Err(ReduceError::ComparisonMismatch(self))
    }
  }
}

impl std::fmt::Display for Comparison {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} matched, {} mismatched", self.matched.len(), self.mismatches.len())?;
    for mismatch in &self.mismatches {
      write!(f, "\n  {}", mismatch)?;
    }
    Ok(())
  }
}

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, TransformKind};
use crate::util::hash::{ContentHash, HashError};

/// Errors that can occur while planning or running a build.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A declared input path does not exist, or a glob matched nothing.
  #[error("input not found: {input} ({reason})")]
  InputNotFound { input: String, reason: String },

  #[error("invalid input glob '{pattern}': {message}")]
  InvalidGlob { pattern: String, message: String },

  #[error("failed to read input {path}: {source}")]
  ReadInput {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write output {path}: {source}")]
  OutputWrite {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to clean output directory {path}: {source}")]
  Clean {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to hash build output: {0}")]
  Hash(#[from] HashError),
}

/// A target with its inputs expanded to concrete files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
  pub name: String,
  /// Output path relative to the output directory, `/`-separated.
  pub output: String,
  /// Absolute output file path.
  pub output_path: PathBuf,
  pub transform: TransformKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub banner: Option<String>,
  /// Source files in bundle order.
  pub sources: Vec<PathBuf>,
}

/// Everything a build will read and write, computed before any write happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
  pub base_dir: PathBuf,
  pub output_dir: PathBuf,
  pub targets: Vec<ResolvedTarget>,
}

impl BuildPlan {
  pub fn source_count(&self) -> usize {
    self.targets.iter().map(|t| t.sources.len()).sum()
  }
}

/// One file written by a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltOutput {
  pub target: String,
  pub path: String,
  pub bytes: u64,
  pub sources: usize,
  pub hash: ContentHash,
}

/// Result of a completed build. Every listed file has been flushed to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub output_dir: PathBuf,
  pub outputs: Vec<BuiltOutput>,
  /// Hash over every file in the output directory.
  pub tree_hash: ContentHash,
}

impl BuildReport {
  pub fn total_bytes(&self) -> u64 {
    self.outputs.iter().map(|o| o.bytes).sum()
  }
}

//! Content hashing for bundles and directory trees.
//!
//! - `ContentHash`: a full 64-character SHA-256 digest
//! - `hash_file()`: streaming single file hash
//! - `hash_bytes()`: in-memory buffer hash
//! - `hash_tree()`: deterministic hash of every regular file under a directory

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::util::relative_key;

/// A full 64-character SHA-256 hash, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// First `len` characters, for compact display.
  pub fn short(&self, len: usize) -> &str {
    &self.0[..len.min(self.0.len())]
  }
}

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
  #[error("failed to walk {path}: {message}")]
  Walk { path: String, message: String },

  #[error("failed to read file {path}: {source}")]
  ReadFile {
    path: String,
    #[source]
    source: std::io::Error,
  },
}

/// Hash a file's contents without loading it whole.
pub fn hash_file(path: &Path) -> Result<ContentHash, HashError> {
  let read_err = |source| HashError::ReadFile {
    path: path.display().to_string(),
    source,
  };

  let mut file = fs::File::open(path).map_err(read_err)?;
  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = file.read(&mut buffer).map_err(read_err)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}

/// Compute a deterministic hash over the regular files of a directory.
///
/// Only relative paths and file contents contribute; timestamps, permissions
/// and empty directories do not. Two trees with the same files at the same
/// relative paths always hash equal.
pub fn hash_tree(root: &Path) -> Result<ContentHash, HashError> {
  let mut entries: Vec<String> = Vec::new();

  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry.map_err(|e| HashError::Walk {
      path: root.display().to_string(),
      message: e.to_string(),
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let Some(rel) = relative_key(root, entry.path()) else {
      continue;
    };
    let content_hash = hash_file(entry.path())?;
    entries.push(format!("{}:{}", rel, content_hash.0));
  }

  // walkdir sorts per directory; sort the flattened keys as well so that
  // `a/b` vs `a.b` orderings cannot differ between platforms
  entries.sort();

  let mut hasher = Sha256::new();
  for entry in entries {
    hasher.update(entry.as_bytes());
    hasher.update(b"\n");
  }

  Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

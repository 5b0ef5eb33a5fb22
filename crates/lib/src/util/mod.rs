//! Shared utilities.
//!
//! Hashing plus the path helpers used by both the build runner and the
//! directory verifier.

pub mod hash;

use std::path::{Component, Path};

/// Relative `/`-separated key for `path` under `root`.
///
/// Returns `None` for the root itself or for paths outside `root`. Keys are
/// identical across platforms so they can be compared and sorted directly.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
  let rel = path.strip_prefix(root).ok()?;
  let parts: Vec<String> = rel
    .components()
    .filter_map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      _ => None,
    })
    .collect();

  if parts.is_empty() { None } else { Some(parts.join("/")) }
}

/// True when `path` contains a glob metacharacter.
pub fn is_glob(path: &str) -> bool {
  path.contains(['*', '?', '['])
}

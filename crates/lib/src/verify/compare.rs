use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::util::hash::hash_file;
use crate::util::relative_key;
use crate::verify::{Comparison, Mismatch, MismatchKind, PatternSet, VerifyError};

/// Compare the files of `actual` against `expected`.
///
/// Only files whose relative path matches `patterns` take part. Every path in
/// the union of both trees is reported exactly once: as matched, or as a
/// [`Mismatch`]. Neither directory is modified.
///
/// Symlinks are followed, so a linked file is compared by the contents of its
/// target; a dangling link fails with [`VerifyError::Walk`]. Keys are built
/// with lossy UTF-8 conversion, so two names that differ only in invalid
/// UTF-8 bytes map to the same key and only one of them is compared.
pub fn compare_directories(actual: &Path, expected: &Path, patterns: &PatternSet) -> Result<Comparison, VerifyError> {
  let actual_files = collect_files(actual, patterns)?;
  let expected_files = collect_files(expected, patterns)?;

  let keys: BTreeSet<&String> = actual_files.keys().chain(expected_files.keys()).collect();

  let mut comparison = Comparison::default();

  for key in keys {
    match (actual_files.get(key), expected_files.get(key)) {
      (Some(actual_path), Some(expected_path)) => {
        let actual_hash = hash_file(actual_path)?;
        let expected_hash = hash_file(expected_path)?;

        if actual_hash == expected_hash {
          debug!(path = %key, "match");
          comparison.matched.push(key.clone());
        } else {
          let first_difference = first_difference(actual_path, expected_path)?;
          comparison.mismatches.push(Mismatch {
            path: key.clone(),
            kind: MismatchKind::ContentMismatch {
              expected: expected_hash,
              actual: actual_hash,
              first_difference,
            },
          });
        }
      }
      (None, Some(_)) => comparison.mismatches.push(Mismatch {
        path: key.clone(),
        kind: MismatchKind::MissingInActual,
      }),
      (Some(_), None) => comparison.mismatches.push(Mismatch {
        path: key.clone(),
        kind: MismatchKind::MissingInExpected,
      }),
      (None, None) => unreachable!("key comes from one of the two maps"),
    }
  }

  for mismatch in &comparison.mismatches {
    warn!(path = %mismatch.path, kind = mismatch.kind.label(), "directory mismatch");
  }
  info!(
    matched = comparison.matched.len(),
    mismatched = comparison.mismatches.len(),
    "comparison finished"
  );

  Ok(comparison)
}

/// Regular files under `root` whose relative key matches `patterns`.
fn collect_files(root: &Path, patterns: &PatternSet) -> Result<BTreeMap<String, PathBuf>, VerifyError> {
  if !root.is_dir() {
    return Err(VerifyError::MissingRoot {
      path: root.display().to_string(),
    });
  }

  let mut files = BTreeMap::new();

  for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(|e| VerifyError::Walk {
      path: root.display().to_string(),
      message: e.to_string(),
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let Some(key) = relative_key(root, entry.path()) else {
      continue;
    };

    if patterns.matches(&key) {
      files.insert(key, entry.into_path());
    }
  }

  Ok(files)
}

/// Byte offset of the first difference between two files known to differ.
///
/// When one file is a prefix of the other, this is the length of the shorter.
fn first_difference(a: &Path, b: &Path) -> Result<u64, VerifyError> {
  let read = |path: &Path| -> Result<Vec<u8>, VerifyError> {
    let mut buf = Vec::new();
    fs::File::open(path)
      .and_then(|mut f| f.read_to_end(&mut buf))
      .map_err(|source| VerifyError::Read {
        path: path.display().to_string(),
        source,
      })?;
    Ok(buf)
  };

  let a = read(a)?;
  let b = read(b)?;

  let offset = a
    .iter()
    .zip(b.iter())
    .position(|(x, y)| x != y)
    .unwrap_or_else(|| a.len().min(b.len()));

  Ok(offset as u64)
}

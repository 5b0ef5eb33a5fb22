//! Shared helpers for library integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

/// Get path to a fixture directory.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// A fixture copied into a temporary directory.
///
/// Builds write into the copy, so the checked-in fixture never gains a
/// `build/` directory.
pub struct FixtureEnv {
  pub temp: TempDir,
}

impl FixtureEnv {
  pub fn new(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    copy_tree(&fixture_path(name), temp.path());
    Self { temp }
  }

  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.root().join(relative)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.path("build")
  }

  pub fn expected_dir(&self) -> PathBuf {
    self.path("expected")
  }
}

fn copy_tree(from: &Path, to: &Path) {
  for entry in WalkDir::new(from) {
    let entry = entry.unwrap();
    let rel = entry.path().strip_prefix(from).unwrap();
    let target = to.join(rel);
    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).unwrap();
    } else {
      fs::copy(entry.path(), &target).unwrap();
    }
  }
}

/// Every file under `root` as (relative path, bytes), sorted by path.
pub fn snapshot_tree(root: &Path) -> Vec<(String, Vec<u8>)> {
  let mut files: Vec<_> = WalkDir::new(root)
    .into_iter()
    .map(|e| e.unwrap())
    .filter(|e| e.file_type().is_file())
    .map(|e| {
      let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
      (rel, fs::read(e.path()).unwrap())
    })
    .collect();
  files.sort();
  files
}

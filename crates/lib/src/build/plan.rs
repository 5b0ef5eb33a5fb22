//! Build planning.
//!
//! Planning expands every target's inputs to concrete files and checks that
//! the build can run without destroying its own sources. Nothing is written.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::build::{BuildError, BuildPlan, ResolvedTarget};
use crate::config::{ConfigError, ReduceConfig, TargetDef};
use crate::util::is_glob;

const GLOB_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Resolve a config into a [`BuildPlan`].
///
/// Fails with [`BuildError::InputNotFound`] when a literal input is missing
/// or a glob matches no file, and with [`ConfigError::Invalid`] when the
/// output directory would swallow the base directory or a literal input. Glob
/// matches inside the output directory are skipped.
pub fn plan_build(config: &ReduceConfig) -> Result<BuildPlan, BuildError> {
  config.validate()?;

  let base_dir = normalize(&config.base_dir);
  let output_dir = normalize(&config.output_path());

  if base_dir.starts_with(&output_dir) {
    return Err(
      ConfigError::invalid(format!(
        "output directory {} contains the base directory {}",
        output_dir.display(),
        base_dir.display()
      ))
      .into(),
    );
  }

  let mut targets = Vec::with_capacity(config.targets.len());

  for target in &config.targets {
    let sources = resolve_inputs(target, &base_dir, &output_dir)?;

    if let Some(inside) = sources.iter().find(|s| s.starts_with(&output_dir)) {
      return Err(
        ConfigError::invalid(format!(
          "target '{}': input {} lies inside the output directory {}",
          target.display_name(),
          inside.display(),
          output_dir.display()
        ))
        .into(),
      );
    }

    let output = Path::new(&target.output)
      .components()
      .filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
      })
      .collect::<Vec<_>>()
      .join("/");
    let output_path = output.split('/').fold(output_dir.clone(), |acc, part| acc.join(part));

    debug!(
      name = target.display_name(),
      sources = sources.len(),
      output = %output_path.display(),
      "target resolved"
    );

    targets.push(ResolvedTarget {
      name: target.display_name().to_string(),
      output,
      output_path,
      transform: target.transform,
      banner: target.banner.clone(),
      sources,
    });
  }

  Ok(BuildPlan {
    base_dir,
    output_dir,
    targets,
  })
}

/// Expand a target's inputs in declaration order, dropping repeats.
fn resolve_inputs(target: &TargetDef, base_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let mut seen = HashSet::new();
  let mut sources = Vec::new();

  for entry in target.input.entries() {
    let matches = if is_glob(entry) {
      expand_glob(entry, base_dir, output_dir)?
    } else {
      vec![resolve_literal(entry, base_dir)?]
    };

    for path in matches {
      if seen.insert(path.clone()) {
        sources.push(path);
      }
    }
  }

  Ok(sources)
}

fn resolve_literal(entry: &str, base_dir: &Path) -> Result<PathBuf, BuildError> {
  let path = normalize(&base_dir.join(entry));

  if !path.exists() {
    return Err(BuildError::InputNotFound {
      input: entry.to_string(),
      reason: format!("{} does not exist", path.display()),
    });
  }
  if !path.is_file() {
    return Err(BuildError::InputNotFound {
      input: entry.to_string(),
      reason: format!("{} is not a regular file", path.display()),
    });
  }

  Ok(path)
}

/// Expand a glob relative to `base_dir`. Matches are files only, sorted.
///
/// Files under `output_dir` are skipped: they belong to the previous build and
/// are deleted before this one writes.
fn expand_glob(entry: &str, base_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let pattern = if Path::new(entry).is_absolute() {
    entry.to_string()
  } else {
    let base = Pattern::escape(&base_dir.to_string_lossy());
    format!("{}/{}", base.trim_end_matches(['/', '\\']), entry)
  };

  let paths = glob::glob_with(&pattern, GLOB_OPTIONS).map_err(|e| BuildError::InvalidGlob {
    pattern: entry.to_string(),
    message: e.to_string(),
  })?;

  let mut matches = Vec::new();
  for path in paths {
    let path = path.map_err(|e| BuildError::InputNotFound {
      input: entry.to_string(),
      reason: format!("cannot read {}: {}", e.path().display(), e.error()),
    })?;
    let path = normalize(&path);
    if path.starts_with(output_dir) {
      debug!(input = entry, path = %path.display(), "skipping match inside output directory");
      continue;
    }
    if path.is_file() {
      matches.push(path);
    }
  }

  if matches.is_empty() {
    return Err(BuildError::InputNotFound {
      input: entry.to_string(),
      reason: "glob matched no files".to_string(),
    });
  }

  matches.sort();
  Ok(matches)
}

/// Resolve `.` and `..` lexically. The output directory may not exist yet, so
/// the filesystem cannot be consulted.
pub(crate) fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};

/// One input path or glob, or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSpec {
  One(String),
  Many(Vec<String>),
}

impl InputSpec {
  pub fn entries(&self) -> &[String] {
    match self {
      InputSpec::One(entry) => std::slice::from_ref(entry),
      InputSpec::Many(entries) => entries,
    }
  }
}

impl From<&str> for InputSpec {
  fn from(entry: &str) -> Self {
    InputSpec::One(entry.to_string())
  }
}

impl From<Vec<&str>> for InputSpec {
  fn from(entries: Vec<&str>) -> Self {
    InputSpec::Many(entries.into_iter().map(str::to_string).collect())
  }
}

/// How a target's sources are combined into its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
  /// Sources joined in order, each terminated by a newline.
  #[default]
  Concat,
  /// Concatenation with trailing whitespace and blank lines removed.
  Compact,
}

impl std::fmt::Display for TransformKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TransformKind::Concat => write!(f, "concat"),
      TransformKind::Compact => write!(f, "compact"),
    }
  }
}

/// A single declared inputs-to-output mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetDef {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub input: InputSpec,
  /// Output file, relative to the output directory.
  pub output: String,
  #[serde(default)]
  pub transform: TransformKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub banner: Option<String>,
}

impl TargetDef {
  pub fn new(input: impl Into<InputSpec>, output: &str) -> Self {
    Self {
      name: None,
      input: input.into(),
      output: output.to_string(),
      transform: TransformKind::default(),
      banner: None,
    }
  }

  pub fn with_name(mut self, name: &str) -> Self {
    self.name = Some(name.to_string());
    self
  }

  pub fn with_transform(mut self, transform: TransformKind) -> Self {
    self.transform = transform;
    self
  }

  pub fn with_banner(mut self, banner: &str) -> Self {
    self.banner = Some(banner.to_string());
    self
  }

  /// Name used in logs and reports; falls back to the output path.
  pub fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or(&self.output)
  }
}

/// The on-disk shape of a config file, before paths are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  #[serde(default)]
  pub output_dir: Option<String>,
  #[serde(default)]
  pub base_dir: Option<String>,
  pub targets: Vec<TargetDef>,
}

/// A loaded configuration.
///
/// `base_dir` is absolute; every relative path in the config (inputs and
/// `output_dir`) is interpreted against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReduceConfig {
  pub base_dir: PathBuf,
  pub output_dir: PathBuf,
  pub targets: Vec<TargetDef>,
}

impl ReduceConfig {
  pub fn new(base_dir: impl Into<PathBuf>) -> Self {
    Self {
      base_dir: base_dir.into(),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      targets: Vec::new(),
    }
  }

  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  pub fn with_target(mut self, target: TargetDef) -> Self {
    self.targets.push(target);
    self
  }

  /// Resolve a raw config file against the directory that contained it.
  pub fn from_file(file: ConfigFile, config_dir: &Path) -> Self {
    let base_dir = match file.base_dir {
      Some(dir) => config_dir.join(dir),
      None => config_dir.to_path_buf(),
    };
    let base_dir = dunce::canonicalize(&base_dir).unwrap_or(base_dir);

    Self {
      base_dir,
      output_dir: PathBuf::from(file.output_dir.unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())),
      targets: file.targets,
    }
  }

  /// Absolute output directory.
  pub fn output_path(&self) -> PathBuf {
    self.base_dir.join(&self.output_dir)
  }

  /// Replace `output_dir` with `REDUCE_OUTPUT_DIR` when it is set and non-empty.
  pub fn apply_env_overrides(&mut self) {
    match std::env::var(OUTPUT_DIR_ENV) {
      Ok(dir) if !dir.is_empty() => self.output_dir = PathBuf::from(dir),
      _ => {}
    }
  }

  /// Check the structural rules every config must satisfy.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.targets.is_empty() {
      return Err(ConfigError::invalid("config declares no targets"));
    }
    if self.output_dir.as_os_str().is_empty() {
      return Err(ConfigError::invalid("output_dir must not be empty"));
    }

    let mut outputs = HashSet::new();
    let mut names = HashSet::new();

    for (idx, target) in self.targets.iter().enumerate() {
      let label = format!("targets[{}] ({})", idx, target.display_name());

      let entries = target.input.entries();
      if entries.is_empty() {
        return Err(ConfigError::invalid(format!("{}: input must not be empty", label)));
      }
      if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::invalid(format!("{}: input entries must not be blank", label)));
      }

      validate_output_path(&target.output).map_err(|reason| ConfigError::invalid(format!("{}: {}", label, reason)))?;

      let output = normalize_output(&target.output);
      if let Some(other) = outputs
        .iter()
        .find(|other: &&String| is_parent_of(other, &output) || is_parent_of(&output, other))
      {
        return Err(ConfigError::invalid(format!(
          "{}: output '{}' clashes with output '{}' (one would be a directory of the other)",
          label, target.output, other
        )));
      }
      if !outputs.insert(output) {
        return Err(ConfigError::invalid(format!(
          "{}: output '{}' is declared by more than one target",
          label, target.output
        )));
      }

      if let Some(name) = &target.name {
        if !names.insert(name.as_str()) {
          return Err(ConfigError::invalid(format!("{}: duplicate target name '{}'", label, name)));
        }
      }
    }

    Ok(())
  }
}

fn validate_output_path(output: &str) -> Result<(), String> {
  if output.trim().is_empty() {
    return Err("output must not be empty".to_string());
  }

  let path = Path::new(output);
  for component in path.components() {
    match component {
      Component::Normal(_) | Component::CurDir => {}
      Component::ParentDir => return Err(format!("output '{}' must not contain '..'", output)),
      Component::RootDir | Component::Prefix(_) => {
        return Err(format!("output '{}' must be relative to the output directory", output));
      }
    }
  }

  if normalize_output(output).is_empty() {
    return Err(format!("output '{}' does not name a file", output));
  }

  Ok(())
}

/// `css` is a parent of `css/x.css` but not of `css.map` or `css`.
fn is_parent_of(dir: &str, path: &str) -> bool {
  path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}

/// `./css//bundle.css` and `css/bundle.css` name the same file.
fn normalize_output(output: &str) -> String {
  Path::new(output)
    .components()
    .filter_map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      _ => None,
    })
    .collect::<Vec<_>>()
    .join("/")
}

use glob::{MatchOptions, Pattern};

use crate::verify::VerifyError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Inclusion filter over `/`-separated relative paths.
///
/// `*` never crosses a `/`; a leading `**/` matches zero or more
/// directories, so `**/*.css` selects `bundle.css` and `css/site.css` alike.
/// An empty set includes every file.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
  patterns: Vec<Pattern>,
}

impl PatternSet {
  pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, VerifyError> {
    let patterns = patterns
      .iter()
      .map(|p| {
        let p = p.as_ref();
        Pattern::new(p).map_err(|e| VerifyError::InvalidPattern {
          pattern: p.to_string(),
          message: e.to_string(),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self { patterns })
  }

  /// A set that includes every file.
  pub fn all() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  pub fn matches(&self, key: &str) -> bool {
    self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches_with(key, MATCH_OPTIONS))
  }

  pub fn as_strs(&self) -> Vec<&str> {
    self.patterns.iter().map(Pattern::as_str).collect()
  }
}

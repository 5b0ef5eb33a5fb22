//! Source combination strategies.
//!
//! [`Bundler`] is the one place the transform can be swapped. Every
//! implementation must be a pure function of its sources so that repeated
//! builds produce identical bytes.

use crate::config::TransformKind;

/// A source file read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
  /// Display name, relative to the base directory when possible.
  pub name: String,
  pub contents: Vec<u8>,
}

impl Source {
  pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
    Self {
      name: name.into(),
      contents: contents.into(),
    }
  }
}

pub trait Bundler: Send + Sync {
  fn bundle(&self, sources: &[Source]) -> Vec<u8>;
}

/// Joins sources in order, terminating each non-empty one with a newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct Concat;

impl Bundler for Concat {
  fn bundle(&self, sources: &[Source]) -> Vec<u8> {
    let mut out = Vec::with_capacity(sources.iter().map(|s| s.contents.len() + 1).sum());
    for source in sources {
      push_terminated(&mut out, &source.contents);
    }
    out
  }
}

/// Concatenation that drops blank lines and trailing whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct Compact;

impl Bundler for Compact {
  fn bundle(&self, sources: &[Source]) -> Vec<u8> {
    let joined = Concat.bundle(sources);
    let mut out = Vec::with_capacity(joined.len());

    for line in joined.split(|b| *b == b'\n') {
      let trimmed = trim_end(line);
      if trimmed.is_empty() {
        continue;
      }
      out.extend_from_slice(trimmed);
      out.push(b'\n');
    }

    out
  }
}

pub fn bundler_for(kind: TransformKind) -> Box<dyn Bundler> {
  match kind {
    TransformKind::Concat => Box::new(Concat),
    TransformKind::Compact => Box::new(Compact),
  }
}

/// Bundle `sources` with `bundler`, prefixed by the optional banner.
pub fn render(bundler: &dyn Bundler, banner: Option<&str>, sources: &[Source]) -> Vec<u8> {
  let body = bundler.bundle(sources);
  match banner {
    Some(banner) if !banner.is_empty() => {
      let mut out = Vec::with_capacity(banner.len() + 1 + body.len());
      push_terminated(&mut out, banner.as_bytes());
      out.extend_from_slice(&body);
      out
    }
    _ => body,
  }
}

fn push_terminated(out: &mut Vec<u8>, chunk: &[u8]) {
  if chunk.is_empty() {
    return;
  }
  out.extend_from_slice(chunk);
  if !chunk.ends_with(b"\n") {
    out.push(b'\n');
  }
}

fn trim_end(line: &[u8]) -> &[u8] {
  let end = line
    .iter()
    .rposition(|b| !matches!(b, b' ' | b'\t' | b'\r'))
    .map_or(0, |i| i + 1);
  &line[..end]
}

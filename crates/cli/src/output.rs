//! CLI output formatting utilities.
//!
//! Colored status lines, human-readable sizes and durations, and JSON output.
//! Human-readable output goes to stdout; errors and warnings to stderr.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use reduce_lib::verify::{Comparison, MismatchKind};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const REMOVE: &str = "-";
}

pub fn truncate_hash(hash: &str) -> &str {
  let len = hash.len().min(12);
  &hash[..len]
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = KB * 1024;

  if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// One line per mismatch, then a summary line.
pub fn print_comparison(comparison: &Comparison, verbose: bool) {
  if verbose {
    for path in &comparison.matched {
      println!("  {} {}", symbols::INFO.if_supports_color(Stream::Stdout, |s| s.dimmed()), path);
    }
  }

  for mismatch in &comparison.mismatches {
    let symbol = match mismatch.kind {
      MismatchKind::MissingInActual => symbols::REMOVE.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
      MismatchKind::MissingInExpected => symbols::ADD.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
      MismatchKind::ContentMismatch { .. } => {
        symbols::MODIFY.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string()
      }
    };
    println!("  {} {}", symbol, mismatch);

    if let MismatchKind::ContentMismatch { expected, actual, .. } = &mismatch.kind {
      println!(
        "      expected {} {} actual {}",
        truncate_hash(&expected.0),
        symbols::ARROW,
        truncate_hash(&actual.0)
      );
    }
  }

  if comparison.is_match() {
    print_success(&format!("{} file(s) match", comparison.matched.len()));
  } else {
    print_error(&format!(
      "{} mismatch(es), {} file(s) match",
      comparison.mismatches.len(),
      comparison.matched.len()
    ));
  }
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

//! Implementation of the `reduce build` command.
//!
//! Loads a config, wipes its output directory and writes every target.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use reduce_lib::build::reduce;

use crate::output::{OutputFormat, format_bytes, format_duration, print_json, print_stat, print_success, symbols};

pub fn cmd_build(config_path: &Path, out_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
  let config = super::load_with_override(config_path, out_dir)?;

  let started = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(reduce(&config)).context("Build failed")?;
  let elapsed = started.elapsed();

  if format.is_json() {
    return print_json(&report);
  }

  for output in &report.outputs {
    println!(
      "  {} {} {}",
      symbols::ADD.if_supports_color(Stream::Stdout, |s| s.green()),
      output.path,
      format!(
        "({}, {} source(s), {})",
        format_bytes(output.bytes),
        output.sources,
        output.hash.short(12)
      )
      .if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  print_success(&format!(
    "Built {} file(s) in {}",
    report.outputs.len(),
    format_duration(elapsed)
  ));
  print_stat("Output", &report.output_dir.display().to_string());
  print_stat("Size", &format_bytes(report.total_bytes()));
  print_stat("Tree hash", report.tree_hash.short(12));

  Ok(())
}

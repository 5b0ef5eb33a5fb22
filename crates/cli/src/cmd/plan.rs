//! Implementation of the `reduce plan` command.
//!
//! Resolves every target's inputs and prints them. Nothing is written.

use std::path::Path;

use anyhow::{Context, Result};

use reduce_lib::build::plan_build;
use reduce_lib::util::relative_key;

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_plan(config_path: &Path, format: OutputFormat) -> Result<()> {
  let config = super::load_with_override(config_path, None)?;
  let plan = plan_build(&config).context("Failed to plan build")?;

  if format.is_json() {
    return print_json(&plan);
  }

  println!("Base: {}", plan.base_dir.display());
  println!("Output: {}", plan.output_dir.display());
  println!();

  for target in &plan.targets {
    println!("{} {} ({})", target.name, symbols::ARROW, target.output);
    println!("  transform: {}", target.transform);
    for source in &target.sources {
      let shown = relative_key(&plan.base_dir, source).unwrap_or_else(|| source.display().to_string());
      println!("  {} {}", symbols::INFO, shown);
    }
  }

  println!();
  print_info(&format!(
    "{} target(s), {} source file(s)",
    plan.targets.len(),
    plan.source_count()
  ));

  Ok(())
}

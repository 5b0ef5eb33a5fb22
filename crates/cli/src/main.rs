mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reduce_lib::consts::DEFAULT_CONFIG_FILE;

use crate::cmd::{cmd_build, cmd_check, cmd_info, cmd_plan, cmd_verify};
use crate::output::OutputFormat;

/// reduce - bundle assets from a declarative config and check them against fixtures
#[derive(Parser)]
#[command(name = "reduce")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build every target into a freshly cleaned output directory
  Build {
    /// Path to the config file (.lua or .json)
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write into this directory instead of the configured one
    #[arg(long)]
    out_dir: Option<PathBuf>,
  },

  /// Show the files each target would read, without writing anything
  Plan {
    /// Path to the config file (.lua or .json)
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
  },

  /// Compare two directories
  Verify {
    /// Directory produced by a build
    actual: PathBuf,

    /// Golden directory to compare against
    expected: PathBuf,

    /// Glob selecting the files to compare (repeatable; default: all files)
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,
  },

  /// Build, then compare the output directory against a golden directory
  Check {
    /// Golden directory to compare against
    expected: PathBuf,

    /// Path to the config file (.lua or .json)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Glob selecting the files to compare (repeatable; default: all files)
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Write into this directory instead of the configured one
    #[arg(long)]
    out_dir: Option<PathBuf>,
  },

  /// Show version and configuration details
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  match cli.command {
    Commands::Build { config, out_dir } => cmd_build(&config, out_dir.as_deref(), cli.format),
    Commands::Plan { config } => cmd_plan(&config, cli.format),
    Commands::Verify {
      actual,
      expected,
      patterns,
    } => cmd_verify(&actual, &expected, &patterns, cli.verbose, cli.format),
    Commands::Check {
      expected,
      config,
      patterns,
      out_dir,
    } => cmd_check(&config, &expected, &patterns, out_dir.as_deref(), cli.verbose, cli.format),
    Commands::Info => {
      cmd_info(cli.format);
      Ok(())
    }
  }
}

/// Logs go to stderr so that `--format json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

//! reduce-lib: config-driven asset bundling with golden-directory checks.
//!
//! - [`config`]: loading and validating Lua/JSON configs
//! - [`build`]: planning, bundling and writing targets
//! - [`verify`]: comparing two directory trees under glob filters
//! - [`check`]: build followed by verification

pub mod build;
pub mod check;
pub mod config;
pub mod consts;
pub mod error;
pub mod util;
pub mod verify;

pub use build::{BuildReport, reduce};
pub use check::{CheckOutcome, check};
pub use config::{ReduceConfig, TargetDef, load_config};
pub use error::ReduceError;
pub use verify::{Comparison, PatternSet, compare_directories};

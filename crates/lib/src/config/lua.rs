//! Lua config evaluation.
//!
//! A Lua config is a chunk that returns a table matching [`ConfigFile`]. The
//! chunk runs in a fresh VM with a `reduce` global holding the directory of
//! the config file (`reduce.dir`) and the tool version (`reduce.version`).

use std::path::Path;

use mlua::LuaSerdeExt;
use mlua::prelude::*;
use tracing::debug;

use crate::config::{ConfigError, ConfigFile};

/// Create a Lua VM with the `reduce` global registered.
pub fn create_runtime(config_dir: &Path) -> LuaResult<Lua> {
  let lua = Lua::new();

  let reduce = lua.create_table()?;
  reduce.set("dir", config_dir.to_string_lossy().to_string())?;
  reduce.set("version", env!("CARGO_PKG_VERSION"))?;
  lua.globals().set("reduce", reduce)?;

  Ok(lua)
}

/// Evaluate `source` (read from `path`) and deserialize its return value.
pub fn eval_config(path: &Path, source: &str, config_dir: &Path) -> Result<ConfigFile, ConfigError> {
  let lua_err = |e: LuaError| ConfigError::Lua {
    path: path.display().to_string(),
    message: e.to_string(),
  };

  let lua = create_runtime(config_dir).map_err(lua_err)?;
  let value = lua
    .load(source)
    .set_name(format!("@{}", path.display()))
    .eval::<LuaValue>()
    .map_err(lua_err)?;

  if !value.is_table() {
    return Err(ConfigError::invalid(format!(
      "{} must return a table, got {}",
      path.display(),
      value.type_name()
    )));
  }

  debug!(path = %path.display(), "lua config evaluated");

  lua
    .from_value::<ConfigFile>(value)
    .map_err(|e| ConfigError::invalid(format!("{}: {}", path.display(), e)))
}

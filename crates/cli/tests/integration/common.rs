//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const CONFIG: &str = r#"
return {
  output_dir = "build",
  targets = {
    { name = "styles", input = { "src/a.css", "src/b.css" }, output = "bundle.css" },
    { name = "scripts", input = "src/*.js", output = "js/app.js" },
  },
}
"#;

pub const EXPECTED_CSS: &str = ".a { color: red; }\n.b { color: blue; }\n";
pub const EXPECTED_JS: &str = "var a = 1\nvar b = 2\n";

/// Isolated project directory with sources, a config and a golden directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("reduce.config.lua");
    let env = Self { temp, config_path };

    env.write_file("reduce.config.lua", CONFIG);
    env.write_file("src/a.css", ".a { color: red; }\n");
    env.write_file("src/b.css", ".b { color: blue; }");
    env.write_file("src/a.js", "var a = 1\n");
    env.write_file("src/b.js", "var b = 2\n");
    env.write_file("expected/bundle.css", EXPECTED_CSS);
    env.write_file("expected/js/app.js", EXPECTED_JS);
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    let root = dunce::canonicalize(self.temp.path()).unwrap();
    root.join(relative_path)
  }

  pub fn read(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.path(relative_path)).unwrap()
  }

  /// Command for the reduce binary, running inside the project directory.
  pub fn reduce_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("reduce");
    cmd.current_dir(self.temp.path()).env_remove("REDUCE_OUTPUT_DIR");
    cmd
  }
}

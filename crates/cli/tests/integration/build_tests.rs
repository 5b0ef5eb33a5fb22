use predicates::prelude::*;

use super::common::{EXPECTED_CSS, EXPECTED_JS, TestEnv};

#[test]
fn build_writes_bundles() {
  let env = TestEnv::new();

  env
    .reduce_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 2 file(s)"));

  assert_eq!(env.read("build/bundle.css"), EXPECTED_CSS);
  assert_eq!(env.read("build/js/app.js"), EXPECTED_JS);
}

#[test]
fn build_removes_stale_files() {
  let env = TestEnv::new();
  env.write_file("build/stale.css", "old");

  env.reduce_cmd().arg("build").assert().success();

  assert!(!env.path("build/stale.css").exists());
}

#[test]
fn build_json_reports_outputs() {
  let env = TestEnv::new();

  let output = env.reduce_cmd().args(["--format", "json", "build"]).output().unwrap();
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let outputs = report["outputs"].as_array().unwrap();
  assert_eq!(outputs.len(), 2);
  assert_eq!(outputs[0]["path"], "bundle.css");
  assert_eq!(outputs[1]["path"], "js/app.js");
}

#[test]
fn build_twice_is_identical() {
  let env = TestEnv::new();

  let first = env.reduce_cmd().args(["--format", "json", "build"]).output().unwrap();
  let second = env.reduce_cmd().args(["--format", "json", "build"]).output().unwrap();

  let first: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
  let second: serde_json::Value = serde_json::from_slice(&second.stdout).unwrap();
  assert_eq!(first["tree_hash"], second["tree_hash"]);
}

#[test]
fn build_out_dir_override() {
  let env = TestEnv::new();

  env.reduce_cmd().args(["build", "--out-dir", "dist"]).assert().success();

  assert_eq!(env.read("dist/bundle.css"), EXPECTED_CSS);
  assert!(!env.path("build").exists());
}

#[test]
fn build_env_override() {
  let env = TestEnv::new();

  env
    .reduce_cmd()
    .arg("build")
    .env("REDUCE_OUTPUT_DIR", "public")
    .assert()
    .success();

  assert_eq!(env.read("public/js/app.js"), EXPECTED_JS);
}

#[test]
fn build_missing_input_fails() {
  let env = TestEnv::new();
  std::fs::remove_file(env.path("src/b.css")).unwrap();

  env
    .reduce_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("input not found: src/b.css"));

  assert!(!env.path("build/bundle.css").exists());
}

#[test]
fn plan_lists_sources_without_writing() {
  let env = TestEnv::new();

  env
    .reduce_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("src/a.js"))
    .stdout(predicate::str::contains("2 target(s), 4 source file(s)"));

  assert!(!env.path("build").exists());
}

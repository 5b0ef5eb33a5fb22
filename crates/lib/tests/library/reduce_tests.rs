use std::fs;

use reduce_lib::build::BuildError;
use reduce_lib::config::ConfigError;
use reduce_lib::util::hash::hash_tree;
use reduce_lib::{PatternSet, ReduceConfig, ReduceError, TargetDef, check, compare_directories, load_config, reduce};

use super::common::{FixtureEnv, snapshot_tree};

fn bundle_patterns() -> PatternSet {
  PatternSet::new(&["**/*.css", "**/*.js"]).unwrap()
}

#[tokio::test]
async fn lua_config_builds_expected_bundle() {
  let env = FixtureEnv::new("single-bundle");
  let config = load_config(&env.path("reduce.config.lua")).unwrap();

  let report = reduce(&config).await.unwrap();

  assert_eq!(report.outputs.len(), 2);
  let comparison = compare_directories(&env.build_dir(), &env.expected_dir(), &bundle_patterns()).unwrap();
  assert!(comparison.is_match(), "{}", comparison);
  assert_eq!(comparison.matched, vec!["app.js", "bundle.css"]);
}

#[tokio::test]
async fn json_config_builds_the_same_output() {
  let lua_env = FixtureEnv::new("single-bundle");
  let json_env = FixtureEnv::new("single-bundle");

  let from_lua = reduce(&load_config(&lua_env.path("reduce.config.lua")).unwrap())
    .await
    .unwrap();
  let from_json = reduce(&load_config(&json_env.path("reduce.config.json")).unwrap())
    .await
    .unwrap();

  assert_eq!(from_lua.tree_hash, from_json.tree_hash);
}

#[tokio::test]
async fn repeated_builds_are_byte_identical() {
  let env = FixtureEnv::new("single-bundle");
  let config = load_config(&env.path("reduce.config.lua")).unwrap();

  let first = reduce(&config).await.unwrap();
  let first_tree = snapshot_tree(&env.build_dir());

  let second = reduce(&config).await.unwrap();
  let second_tree = snapshot_tree(&env.build_dir());

  assert_eq!(first_tree, second_tree);
  assert_eq!(first.tree_hash, second.tree_hash);
  assert_eq!(hash_tree(&env.build_dir()).unwrap(), second.tree_hash);
}

#[tokio::test]
async fn broad_glob_rebuilds_without_reading_previous_output() {
  let env = FixtureEnv::new("single-bundle");
  let broad = ReduceConfig::new(env.root()).with_target(TargetDef::new("**/*.css", "bundle.css"));

  let first = reduce(&broad).await.unwrap();
  let second = reduce(&broad).await.unwrap();

  assert_eq!(first.tree_hash, second.tree_hash);
  // expected/bundle.css, src/a.css and src/b.css; build/bundle.css is skipped
  assert_eq!(second.outputs[0].sources, 3);
}

#[tokio::test]
async fn stale_output_is_removed_before_building() {
  let env = FixtureEnv::new("single-bundle");
  fs::create_dir_all(env.path("build/old")).unwrap();
  fs::write(env.path("build/old/leftover.css"), "stale").unwrap();
  let config = load_config(&env.path("reduce.config.lua")).unwrap();

  reduce(&config).await.unwrap();

  assert!(!env.path("build/old/leftover.css").exists());
  let comparison = compare_directories(&env.build_dir(), &env.expected_dir(), &bundle_patterns()).unwrap();
  assert!(comparison.is_match(), "{}", comparison);
}

#[tokio::test]
async fn deleted_input_fails_without_output() {
  let env = FixtureEnv::new("single-bundle");
  let config = load_config(&env.path("reduce.config.lua")).unwrap();
  fs::remove_file(env.path("src/b.css")).unwrap();

  let err = reduce(&config).await.unwrap_err();

  match err {
    BuildError::InputNotFound { input, .. } => assert_eq!(input, "src/b.css"),
    other => panic!("expected InputNotFound, got {:?}", other),
  }
  assert!(!env.path("build/bundle.css").exists());
  assert!(!env.path("build/app.js").exists());
}

#[tokio::test]
async fn check_passes_against_fixture() {
  let env = FixtureEnv::new("single-bundle");
  let config = load_config(&env.path("reduce.config.lua")).unwrap();

  let outcome = check(&config, &env.expected_dir(), &bundle_patterns()).await.unwrap();

  assert!(outcome.comparison.is_match());
  assert_eq!(outcome.build.outputs.len(), 2);
}

#[tokio::test]
async fn check_reports_divergent_expectation() {
  let env = FixtureEnv::new("single-bundle");
  fs::write(env.path("expected/bundle.css"), ".a { color: green; }\n").unwrap();
  let config = load_config(&env.path("reduce.config.lua")).unwrap();

  let err = check(&config, &env.expected_dir(), &bundle_patterns()).await.unwrap_err();

  let comparison = err.comparison().expect("comparison mismatch");
  assert_eq!(comparison.mismatches.len(), 1);
  assert_eq!(comparison.mismatches[0].path, "bundle.css");
}

#[tokio::test]
async fn check_surfaces_config_errors() {
  let env = FixtureEnv::new("single-bundle");
  let mut config = load_config(&env.path("reduce.config.lua")).unwrap();
  config.targets.clear();

  let err = check(&config, &env.expected_dir(), &bundle_patterns()).await.unwrap_err();

  assert!(matches!(
    err,
    ReduceError::Build(BuildError::Config(ConfigError::Invalid { .. }))
  ));
}

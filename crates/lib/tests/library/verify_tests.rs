use std::fs;

use reduce_lib::verify::MismatchKind;
use reduce_lib::{PatternSet, compare_directories, load_config, reduce};

use super::common::FixtureEnv;

async fn built_fixture() -> FixtureEnv {
  let env = FixtureEnv::new("single-bundle");
  let config = load_config(&env.path("reduce.config.lua")).unwrap();
  reduce(&config).await.unwrap();
  env
}

#[tokio::test]
async fn corrupted_byte_is_one_content_mismatch() {
  let env = built_fixture().await;
  let bundle = env.path("build/bundle.css");
  let mut bytes = fs::read(&bundle).unwrap();
  bytes[5] ^= 0x01;
  fs::write(&bundle, bytes).unwrap();

  let patterns = PatternSet::new(&["**/*.css"]).unwrap();
  let comparison = compare_directories(&env.build_dir(), &env.expected_dir(), &patterns).unwrap();

  assert_eq!(comparison.mismatches.len(), 1);
  assert_eq!(comparison.mismatches[0].path, "bundle.css");
  assert!(matches!(
    comparison.mismatches[0].kind,
    MismatchKind::ContentMismatch { first_difference: 5, .. }
  ));
}

#[tokio::test]
async fn removed_output_is_one_missing_in_actual() {
  let env = built_fixture().await;
  fs::remove_file(env.path("build/app.js")).unwrap();

  let patterns = PatternSet::new(&["**/*.css", "**/*.js"]).unwrap();
  let comparison = compare_directories(&env.build_dir(), &env.expected_dir(), &patterns).unwrap();

  assert_eq!(comparison.mismatches.len(), 1);
  assert_eq!(comparison.mismatches[0].path, "app.js");
  assert_eq!(comparison.mismatches[0].kind, MismatchKind::MissingInActual);
  assert_eq!(comparison.matched, vec!["bundle.css"]);
}

#[tokio::test]
async fn pattern_restriction_hides_other_file_types() {
  let env = built_fixture().await;
  fs::remove_file(env.path("build/app.js")).unwrap();

  let patterns = PatternSet::new(&["**/*.css"]).unwrap();
  let comparison = compare_directories(&env.build_dir(), &env.expected_dir(), &patterns).unwrap();

  assert!(comparison.is_match());
}

#[test]
fn identical_trees_compare_clean() {
  let env = FixtureEnv::new("single-bundle");

  let comparison = compare_directories(&env.expected_dir(), &env.expected_dir(), &PatternSet::all()).unwrap();

  assert!(comparison.is_match());
  assert_eq!(comparison.matched.len(), 2);
}

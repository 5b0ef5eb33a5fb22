//! Fixture-driven tests for the build runner and directory verifier.

mod common;
mod reduce_tests;
mod verify_tests;

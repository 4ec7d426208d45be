//! Common test utilities for Dockyard scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated service directory plus home, and a CLI runner
//! - Assertion macros: `assert_written!`, `assert_output_contains!`
//! - Fixtures: service files and API documents

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;

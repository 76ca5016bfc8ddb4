//! Integration test suite for the js-asset command line tool
//!
//! These tests run the compiled `js-asset` binary against settings files and
//! media manifests written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: `js-asset render` output, nonces, templates and widget selection
//! - **csp**: `js-asset nonce` and `js-asset csp-header`
//! - **errors**: Error messages and suggestions for bad input

mod csp;
mod errors;
mod render;

use assert_cmd::Command;
use std::path::Path;

/// The binary, run inside `dir` with no settings from the environment.
pub fn js_asset(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("js-asset").unwrap();
    cmd.current_dir(dir).env_remove("JS_ASSET_SETTINGS").env_remove("RUST_LOG");
    cmd
}

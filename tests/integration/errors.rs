use js_asset::test_utils::MediaManifestFixture;
use predicates::prelude::*;
use tempfile::tempdir;

use crate::js_asset;

#[test]
fn test_missing_manifest() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .args(["render", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read media manifest"));
}

#[test]
fn test_invalid_manifest_syntax() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::invalid_syntax().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid media manifest syntax"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_unresolvable_static_path() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::overlapping_lists().write_to(temp.path()).unwrap();
    std::fs::write(temp.path().join("staticfiles.json"), r#"{"paths": {}}"#).unwrap();
    std::fs::write(temp.path().join("js-asset.toml"), "manifest = \"staticfiles.json\"\n").unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot resolve static path 'a.js'"));
}

#[test]
fn test_explicit_settings_must_exist() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .args(["nonce", "--settings", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_help_lists_commands() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("csp-header"));
}

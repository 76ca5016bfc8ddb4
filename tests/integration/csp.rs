use js_asset::test_utils::SettingsFixture;
use predicates::prelude::*;
use tempfile::tempdir;

use crate::js_asset;

#[test]
fn test_nonce_default_length() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .arg("nonce")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9+/]{22}==\n$").unwrap());
}

#[test]
fn test_nonce_custom_length() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .args(["nonce", "--length", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9+/]{4}\n$").unwrap());
}

#[test]
fn test_csp_header() {
    let temp = tempdir().unwrap();
    SettingsFixture::csp_enabled().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["csp-header", "--nonce", "n1"])
        .assert()
        .success()
        .stdout(
            "Content-Security-Policy: default-src 'self'; \
             script-src 'nonce-n1' https://cdn.example.com; \
             style-src 'nonce-n1'; img-src 'self' data:\n",
        );
}

#[test]
fn test_csp_header_value_only_with_explicit_settings() {
    let temp = tempdir().unwrap();
    let settings = SettingsFixture::csp_enabled().write_to(temp.path()).unwrap();
    let other = tempdir().unwrap();

    js_asset(other.path())
        .args(["csp-header", "--nonce", "n1", "--value-only", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("default-src 'self'; script-src 'nonce-n1'"));
}

#[test]
fn test_csp_header_without_settings_fails() {
    let temp = tempdir().unwrap();

    js_asset(temp.path())
        .args(["csp-header", "--nonce", "n1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("csp.default_src is not configured"))
        .stderr(predicate::str::contains("CSP is disabled"));
}

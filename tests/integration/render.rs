use js_asset::test_utils::{
    MediaManifestFixture, SettingsFixture, init_test_logging, write_static_manifest,
};
use predicates::prelude::*;
use tempfile::tempdir;

use crate::js_asset;

#[test]
fn test_render_basic_manifest() {
    init_test_logging(None);
    let temp = tempdir().unwrap();
    MediaManifestFixture::basic().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml"])
        .assert()
        .success()
        .stdout(
            "<script type=\"importmap\">{\"imports\": {\"tags-lib\": \"/static/tags/lib.js\"}}</script>\n\
             <link href=\"/static/editor.css\" media=\"all\" rel=\"stylesheet\">\n\
             <script src=\"/static/editor.js\"></script>\n\
             <script src=\"/static/shared.js\"></script>\n\
             <script src=\"/static/tags.js\" type=\"module\"></script>\n",
        );
}

#[test]
fn test_render_overlapping_lists_once_each() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::overlapping_lists().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml"])
        .assert()
        .success()
        .stdout(
            "<script src=\"/static/a.js\"></script>\n\
             <script src=\"/static/b.js\"></script>\n\
             <script src=\"/static/c.js\"></script>\n",
        );
}

#[test]
fn test_render_with_nonce() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::overlapping_lists().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml", "--widget", "ab", "--nonce", "test-nonce"])
        .assert()
        .success()
        .stdout(
            "<script src=\"/static/a.js\" nonce=\"test-nonce\"></script>\n\
             <script src=\"/static/b.js\" nonce=\"test-nonce\"></script>\n",
        );
}

#[test]
fn test_render_with_generated_nonce() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::basic().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml", "--generate-nonce"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"<script type="importmap" nonce="[A-Za-z0-9+/=]{24}">"#).unwrap());
}

#[test]
fn test_settings_from_working_directory() {
    let temp = tempdir().unwrap();
    SettingsFixture::csp_enabled().write_to(temp.path()).unwrap();
    MediaManifestFixture::overlapping_lists().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml", "--widget", "bc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<script src="/assets/b.js"></script>"#));
}

#[test]
fn test_settings_from_environment() {
    let temp = tempdir().unwrap();
    let config_dir = temp.path().join("config");
    std::fs::create_dir(&config_dir).unwrap();
    let settings = SettingsFixture::with_static_manifest().write_to(&config_dir).unwrap();
    write_static_manifest(&config_dir, &[("a.js", "a.1111.js"), ("b.js", "b.2222.js")]).unwrap();
    MediaManifestFixture::overlapping_lists().write_to(temp.path()).unwrap();

    js_asset(temp.path())
        .env("JS_ASSET_SETTINGS", &settings)
        .args(["render", "media.toml", "--widget", "ab"])
        .assert()
        .success()
        .stdout(
            "<script src=\"/static/a.1111.js\"></script>\n\
             <script src=\"/static/b.2222.js\"></script>\n",
        );
}

#[test]
fn test_render_with_template() {
    let temp = tempdir().unwrap();
    MediaManifestFixture::basic().write_to(temp.path()).unwrap();
    std::fs::write(
        temp.path().join("page.html"),
        "<head>{{ importmap | safe }}</head>\n<script nonce=\"{{ csp_nonce }}\">boot()</script>",
    )
    .unwrap();

    js_asset(temp.path())
        .args(["render", "media.toml", "--nonce", "abc", "--template", "page.html"])
        .assert()
        .success()
        .stdout(
            "<head><script type=\"importmap\" nonce=\"abc\">{\"imports\": {\"tags-lib\": \"/static/tags/lib.js\"}}</script></head>\n\
             <script nonce=\"abc\">boot()</script>\n",
        );
}

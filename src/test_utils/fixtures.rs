//! Test fixtures for settings files, media manifests and JSON payloads.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample media manifest files.
#[derive(Clone, Debug)]
pub struct MediaManifestFixture {
    pub content: String,
    pub name: String,
}

impl MediaManifestFixture {
    /// Two widgets sharing `shared.js`; the second contributes an import map entry.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
[[widgets]]
name = "editor"
js = ["editor.js", "shared.js"]
css = { all = ["editor.css"] }

[[widgets]]
name = "tags"
js = ["shared.js", { src = "tags.js", attrs = { type = "module" } }]

[widgets.importmap.imports]
"tags-lib" = "/static/tags/lib.js"
"#
            .trim()
            .to_string(),
        }
    }

    /// The three overlapping script lists a+b, b+c and a+c.
    pub fn overlapping_lists() -> Self {
        Self {
            name: "overlapping_lists".to_string(),
            content: r#"
[[widgets]]
name = "ab"
js = ["a.js", "b.js"]

[[widgets]]
name = "bc"
js = ["b.js", "c.js"]

[[widgets]]
name = "ac"
js = ["a.js", "c.js"]
"#
            .trim()
            .to_string(),
        }
    }

    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[[widgets]
name = "broken"
js = ["a.js"
"#
            .trim()
            .to_string(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("media.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", self.name))?;
        Ok(path)
    }
}

/// Sample `js-asset.toml` settings files.
#[derive(Clone, Debug)]
pub struct SettingsFixture {
    pub content: String,
    pub name: String,
}

impl SettingsFixture {
    pub fn csp_enabled() -> Self {
        Self {
            name: "csp_enabled".to_string(),
            content: r#"
static_url = "/assets/"

[csp]
enabled = true
default_src = ["'self'"]
script_src = ["https://cdn.example.com"]
img_src = ["'self'", "data:"]
"#
            .trim()
            .to_string(),
        }
    }

    /// Settings pointing at `staticfiles.json` next to them; write it with
    /// [`write_static_manifest`].
    pub fn with_static_manifest() -> Self {
        Self {
            name: "with_static_manifest".to_string(),
            content: "manifest = \"staticfiles.json\"\n".to_string(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("js-asset.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", self.name))?;
        Ok(path)
    }
}

/// Write a `staticfiles.json` manifest mapping each path to its hashed name.
pub fn write_static_manifest(dir: &Path, paths: &[(&str, &str)]) -> Result<PathBuf> {
    let paths: Map<String, Value> = paths
        .iter()
        .map(|(path, hashed)| ((*path).to_string(), Value::String((*hashed).to_string())))
        .collect();
    let path = dir.join("staticfiles.json");
    let content = serde_json::to_string_pretty(&serde_json::json!({ "paths": paths }))?;
    fs::write(&path, content)?;
    Ok(path)
}

/// The object inside `value`.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn json_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

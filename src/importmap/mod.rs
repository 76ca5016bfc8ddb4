//! Import maps: `imports`, `integrity` and `scopes` accumulated from many sources.
//!
//! Merging is a deep union in which later entries overwrite earlier ones with the
//! same key path. Scopes merge two levels deep. Keys other than the three known
//! ones are dropped.
//!
//! ```rust
//! use js_asset::ImportMap;
//!
//! let a = ImportMap::new().import("a", "/static/a.js");
//! let b = ImportMap::new().import("b", "/static/b.js");
//! assert_eq!(
//!     a.merge(&b).render().unwrap().as_str(),
//!     r#"<script type="importmap">{"imports": {"a": "/static/a.js", "b": "/static/b.js"}}</script>"#
//! );
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::{Hash, Hasher};

use crate::core::Result;
use crate::html::{AttrValue, Attrs, SafeHtml, to_script_json};

type Specifiers = IndexMap<String, String>;

/// A browser import map plus the attributes of its script tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportMap {
    imports: Specifiers,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    integrity: Specifiers,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    scopes: IndexMap<String, Specifiers>,
    #[serde(skip)]
    attrs: Attrs,
}

impl ImportMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw JSON such as `{"imports": {...}, "scopes": {...}}`.
    pub fn from_value(value: &Value) -> Self {
        let mut map = Self::new();
        map.update_from_value(value);
        map
    }

    /// Map `specifier` to `url` in `imports`.
    #[must_use]
    pub fn import(mut self, specifier: impl Into<String>, url: impl Into<String>) -> Self {
        self.imports.insert(specifier.into(), url.into());
        self
    }

    /// Record an integrity hash for `url`.
    #[must_use]
    pub fn integrity_hash(mut self, url: impl Into<String>, hash: impl Into<String>) -> Self {
        self.integrity.insert(url.into(), hash.into());
        self
    }

    /// Map `specifier` to `url` inside `scope`.
    #[must_use]
    pub fn scoped(
        mut self,
        scope: impl Into<String>,
        specifier: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.scopes
            .entry(scope.into())
            .or_default()
            .insert(specifier.into(), url.into());
        self
    }

    /// Add or replace one attribute of the `<script type="importmap">` tag.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Replace all tag attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn imports(&self) -> &IndexMap<String, String> {
        &self.imports
    }

    pub fn integrity(&self) -> &IndexMap<String, String> {
        &self.integrity
    }

    pub fn scopes(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.scopes
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// No `imports` means nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Whether any of `imports`, `integrity` or `scopes` holds an entry.
    ///
    /// A map with only integrity hashes still contributes to a merge even
    /// though it renders nothing on its own.
    pub fn has_entries(&self) -> bool {
        !self.imports.is_empty() || !self.integrity.is_empty() || !self.scopes.is_empty()
    }

    /// Record a single entry; an empty scope counts as unscoped.
    pub fn add_entry(&mut self, entry: &ImportMapImport) {
        match entry.scope.as_deref() {
            Some(scope) if !scope.is_empty() => {
                self.scopes
                    .entry(scope.to_string())
                    .or_default()
                    .insert(entry.key.clone(), entry.value.clone());
            }
            _ => {
                self.imports.insert(entry.key.clone(), entry.value.clone());
            }
        }
    }

    /// Merge `other` into `self`; entries of `other` win.
    pub fn update(&mut self, other: &ImportMap) {
        extend(&mut self.imports, &other.imports);
        extend(&mut self.integrity, &other.integrity);
        for (scope, specifiers) in &other.scopes {
            extend(self.scopes.entry(scope.clone()).or_default(), specifiers);
        }
        self.attrs.extend_from(&other.attrs);
    }

    /// Merge a raw JSON import map.
    ///
    /// Unknown top-level keys are ignored, as are entries whose value is not a
    /// string. A value without any recognized key contributes nothing.
    pub fn update_from_value(&mut self, value: &Value) {
        let Some(object) = value.as_object() else {
            tracing::warn!("Ignoring import map that is not a JSON object");
            return;
        };

        for (key, section) in object {
            match key.as_str() {
                "imports" => extend_from_json(&mut self.imports, section),
                "integrity" => extend_from_json(&mut self.integrity, section),
                "scopes" => {
                    if let Some(scopes) = section.as_object() {
                        for (scope, specifiers) in scopes {
                            extend_from_json(
                                self.scopes.entry(scope.clone()).or_default(),
                                specifiers,
                            );
                        }
                    }
                }
                unknown => tracing::debug!("Dropping unknown import map key '{}'", unknown),
            }
        }
    }

    /// A new map holding `self` updated with `other`.
    #[must_use]
    pub fn merge(&self, other: &ImportMap) -> ImportMap {
        let mut merged = self.clone();
        merged.update(other);
        merged
    }

    /// The JSON document, `imports` first; empty `integrity` and `scopes` are omitted.
    pub fn to_json(&self) -> Result<String> {
        to_script_json(self)
    }

    /// A single `<script type="importmap">` tag, or nothing when there are no imports.
    pub fn render(&self) -> Result<SafeHtml> {
        if self.is_empty() {
            return Ok(SafeHtml::default());
        }
        Ok(SafeHtml::from_trusted(format!(
            r#"<script type="importmap"{}>{}</script>"#,
            self.attrs.flatten(),
            self.to_json()?
        )))
    }

    fn canonical(&self) -> String {
        format!("{}{}", self.attrs.flatten(), self.to_json().unwrap_or_default())
    }
}

fn extend(target: &mut Specifiers, source: &Specifiers) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

fn extend_from_json(target: &mut Specifiers, source: &Value) {
    let Some(entries) = source.as_object() else {
        return;
    };
    for (key, value) in entries {
        match value.as_str() {
            Some(url) => {
                target.insert(key.clone(), url.to_string());
            }
            None => tracing::warn!("Ignoring import map entry '{}' with a non-string value", key),
        }
    }
}

impl PartialEq for ImportMap {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ImportMap {}

impl Hash for ImportMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// One specifier mapping, optionally confined to a scope.
///
/// Renders to nothing on its own; a media collection folds all entries into
/// its single import map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportMapImport {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl ImportMapImport {
    /// An unscoped entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            scope: None,
        }
    }

    /// An entry confined to `scope`.
    pub fn scoped(
        key: impl Into<String>,
        value: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            scope: Some(scope.into()),
        }
    }
}

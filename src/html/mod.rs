//! HTML building blocks: attribute maps, escaping and the [`SafeHtml`] output type.
//!
//! Attributes keep insertion order. When flattened, `true` becomes a bare
//! attribute name, `false` is left out, and every other value is escaped and
//! quoted:
//!
//! ```rust
//! use js_asset::html::Attrs;
//!
//! let attrs = Attrs::new()
//!     .with("id", "asset-script")
//!     .with("data-answer", 42)
//!     .with("defer", true)
//!     .with("async", false);
//! assert_eq!(attrs.flatten(), r#" id="asset-script" data-answer="42" defer"#);
//! ```

pub mod json;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use json::to_script_json;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(n) => write!(f, "{n}"),
            // Whole floats keep their fractional part: `1.0`, not `1`.
            AttrValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

/// Insertion-ordered attribute mapping.
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    /// An empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Set `key` to `value`, returning the previous value.
    ///
    /// An existing key keeps its position in the rendered output.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`Attrs::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// The value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Whether `key` is present, whatever its value.
    ///
    /// Use [`Attrs::is_set`] to ignore `false` and empty values.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether `key` holds a value that renders as a meaningful attribute.
    ///
    /// `false`, zero and the empty string count as unset.
    ///
    /// ```rust
    /// use js_asset::html::Attrs;
    ///
    /// let attrs = Attrs::new().with("nonce", false).with("id", "main");
    /// assert!(!attrs.is_set("nonce"));
    /// assert!(attrs.is_set("id"));
    /// ```
    pub fn is_set(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(AttrValue::Bool(false)) | Some(AttrValue::Int(0)) => false,
            Some(AttrValue::Float(x)) => *x != 0.0,
            Some(AttrValue::Text(text)) => !text.is_empty(),
            Some(_) => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }

    /// Copy every entry of `other` into `self`; entries of `other` win.
    pub fn extend_from(&mut self, other: &Attrs) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Render as a string of ` key="value"` pairs, ready to follow a tag name.
    #[must_use]
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            match value {
                AttrValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(&escape(key));
                }
                AttrValue::Bool(false) => {}
                other => {
                    out.push(' ');
                    out.push_str(&escape(key));
                    out.push_str("=\"");
                    out.push_str(&escape(&other.to_string()));
                    out.push('"');
                }
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Escape `& < > " '` for use in HTML text and attribute values.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML that has already been escaped and can be emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Wrap markup built from escaped parts. Only this crate produces it.
    pub(crate) fn from_trusted(html: String) -> Self {
        Self(html)
    }

    /// The rendered markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the markup.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether nothing was rendered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

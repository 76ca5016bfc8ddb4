//! JSON data blocks: `<script type="application/json">`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

use crate::core::{AssetError, Result};
use crate::html::{AttrValue, Attrs, SafeHtml, escape, to_script_json};

/// Data handed to client scripts without inline JavaScript.
///
/// The payload is encoded with [`to_script_json`], so it can never terminate
/// the surrounding script element.
#[derive(Debug, Clone)]
pub struct Json {
    data: Map<String, Value>,
    id: Option<String>,
    attrs: Attrs,
}

impl Json {
    /// A data block holding `data`, without an `id`.
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            id: None,
            attrs: Attrs::new(),
        }
    }

    /// Build from any serializable value whose JSON form is an object.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::SerializationError`] if the value cannot be
    /// serialized or is not a JSON object.
    pub fn from_serializable<T>(data: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(data)? {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(AssetError::SerializationError {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    /// Set the element id used to look the block up from scripts.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Copy every attribute of `attrs`, replacing existing ones.
    #[must_use]
    pub fn attrs_from(mut self, attrs: &Attrs) -> Self {
        self.attrs.extend_from(attrs);
        self
    }

    /// The payload.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Render the `<script type="application/json">` block.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::SerializationError`] if the payload cannot be encoded.
    pub fn render(&self) -> Result<SafeHtml> {
        let id = match self.id.as_deref() {
            Some(id) if !id.is_empty() => format!(r#" id="{}""#, escape(id)),
            _ => String::new(),
        };
        Ok(SafeHtml::from_trusted(format!(
            r#"<script{} type="application/json"{}>{}</script>"#,
            id,
            self.attrs.flatten(),
            to_script_json(&self.data)?
        )))
    }

    fn canonical(&self) -> SafeHtml {
        self.render().unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl PartialEq for Json {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Json {}

impl Hash for Json {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

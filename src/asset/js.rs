//! `<script src>` assets.

use std::hash::{Hash, Hasher};

use crate::core::Result;
use crate::html::{AttrValue, Attrs, SafeHtml, escape};
use crate::static_files::{PathRef, StaticResolver, Unresolved};

/// A script tag with custom attributes.
///
/// ```rust
/// use js_asset::{Js, PrefixResolver};
///
/// let js = Js::new("app/asset.js").attr("id", "asset-script").attr("data-the-answer", 42);
/// assert_eq!(
///     js.render(&PrefixResolver::new("/static/")).unwrap().as_str(),
///     r#"<script src="/static/app/asset.js" id="asset-script" data-the-answer="42"></script>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Js {
    src: PathRef,
    attrs: Attrs,
}

impl Js {
    /// A script for `src` without attributes.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: PathRef::parse(src),
            attrs: Attrs::new(),
        }
    }

    /// A script for `src` carrying `attrs`.
    ///
    /// # Arguments
    ///
    /// * `src` - a relative static path or an absolute URL or path
    /// * `attrs` - rendered after `src` in insertion order
    pub fn with_attrs(src: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            src: PathRef::parse(src),
            attrs,
        }
    }

    /// Add or replace one attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// The declared path.
    pub fn src(&self) -> &PathRef {
        &self.src
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Render the `<script src>` tag.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::StaticResolution`](crate::core::AssetError::StaticResolution)
    /// when the resolver cannot map a relative path.
    pub fn render(&self, resolver: &dyn StaticResolver) -> Result<SafeHtml> {
        let path = self.src.resolve(resolver)?;
        Ok(SafeHtml::from_trusted(format!(
            r#"<script src="{}"{}></script>"#,
            escape(&path),
            self.attrs.flatten()
        )))
    }

    fn canonical(&self) -> SafeHtml {
        self.render(&Unresolved).unwrap_or_default()
    }
}

impl PartialEq for Js {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Js {}

impl Hash for Js {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

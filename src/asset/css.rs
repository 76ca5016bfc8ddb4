//! Stylesheet assets, linked or inline.

use std::hash::{Hash, Hasher};

use crate::constants::DEFAULT_CSS_MEDIA;
use crate::core::Result;
use crate::html::{AttrValue, Attrs, SafeHtml, escape};
use crate::static_files::{PathRef, StaticResolver, Unresolved};

/// A `<link rel="stylesheet">` or an inline `<style>` block.
///
/// Inline CSS is emitted verbatim and must come from a trusted source.
#[derive(Debug, Clone)]
pub struct Css {
    src: PathRef,
    media: String,
    attrs: Attrs,
}

impl Css {
    /// A linked stylesheet for `src` with medium `all`.
    ///
    /// `src` is resolved through the [`StaticResolver`] unless it starts with
    /// `http://`, `https://` or `/`.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: PathRef::parse(src),
            media: DEFAULT_CSS_MEDIA.to_string(),
            attrs: Attrs::new(),
        }
    }

    /// An inline `<style>` block holding `css` verbatim.
    pub fn inline(css: impl Into<String>) -> Self {
        Self {
            src: PathRef::inline(css),
            media: DEFAULT_CSS_MEDIA.to_string(),
            attrs: Attrs::new(),
        }
    }

    /// Set the medium, e.g. `print` or `screen`.
    ///
    /// Inline blocks emit a `media` attribute for any medium other than `all`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use js_asset::{Css, PrefixResolver};
    ///
    /// let css = Css::inline("nav { display: none; }").media("print");
    /// assert_eq!(
    ///     css.render(&PrefixResolver::default()).unwrap().as_str(),
    ///     r#"<style media="print">nav { display: none; }</style>"#
    /// );
    /// ```
    #[must_use]
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    /// Add or replace one attribute.
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

    pub fn src(&self) -> &PathRef {
        &self.src
    }

    /// The medium, `all` unless set.
    pub fn medium(&self) -> &str {
        &self.media
    }

    pub fn is_inline(&self) -> bool {
        self.src.is_inline()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Render a `<link>` tag, or a `<style>` block for inline CSS.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::StaticResolution`](crate::core::AssetError::StaticResolution)
    /// when the resolver cannot map a relative path.
    pub fn render(&self, resolver: &dyn StaticResolver) -> Result<SafeHtml> {
        let html = match &self.src {
            PathRef::Inline(css) => format!(
                "<style{}{}>{}</style>",
                self.inline_media(),
                self.attrs.flatten(),
                css
            ),
            other => format!(
                r#"<link href="{}" media="{}" rel="stylesheet"{}>"#,
                escape(&other.resolve(resolver)?),
                escape(&self.media),
                self.attrs.flatten()
            ),
        };
        Ok(SafeHtml::from_trusted(html))
    }

    /// Inline blocks only name their medium when it narrows the default.
    fn inline_media(&self) -> String {
        if self.media == DEFAULT_CSS_MEDIA || self.attrs.contains_key("media") {
            String::new()
        } else {
            format!(r#" media="{}""#, escape(&self.media))
        }
    }

    fn canonical(&self) -> SafeHtml {
        self.render(&Unresolved).unwrap_or_default()
    }
}

impl PartialEq for Css {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Css {}

impl Hash for Css {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

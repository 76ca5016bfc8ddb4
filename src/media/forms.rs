//! Plain `css`/`js` declarations as written on a form or widget.

use std::collections::BTreeMap;

use super::Media;
use crate::asset::{Asset, Css, Js, Json};
use crate::importmap::ImportMap;

/// An entry of a `js` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsSource {
    Path(String),
    Asset(Asset),
}

/// An entry of a `css` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssSource {
    Path(String),
    Css(Css),
}

impl From<&str> for JsSource {
    fn from(path: &str) -> Self {
        JsSource::Path(path.to_string())
    }
}

impl From<String> for JsSource {
    fn from(path: String) -> Self {
        JsSource::Path(path)
    }
}

impl From<Asset> for JsSource {
    fn from(asset: Asset) -> Self {
        JsSource::Asset(asset)
    }
}

impl From<Js> for JsSource {
    fn from(js: Js) -> Self {
        JsSource::Asset(Asset::Js(js))
    }
}

impl From<Json> for JsSource {
    fn from(json: Json) -> Self {
        JsSource::Asset(Asset::Json(json))
    }
}

impl From<ImportMap> for JsSource {
    fn from(map: ImportMap) -> Self {
        JsSource::Asset(Asset::ImportMap(map))
    }
}

impl From<&str> for CssSource {
    fn from(path: &str) -> Self {
        CssSource::Path(path.to_string())
    }
}

impl From<String> for CssSource {
    fn from(path: String) -> Self {
        CssSource::Path(path)
    }
}

impl From<Css> for CssSource {
    fn from(css: Css) -> Self {
        CssSource::Css(css)
    }
}

/// Stylesheets keyed by medium plus an ordered list of scripts.
///
/// Mirrors the shape forms declare their assets in; [`to_media`](Self::to_media)
/// turns it into a [`Media`] with typed assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormsMedia {
    css: BTreeMap<String, Vec<CssSource>>,
    js: Vec<JsSource>,
}

impl FormsMedia {
    /// An empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a script: a plain path or a typed asset.
    #[must_use]
    pub fn js(mut self, source: impl Into<JsSource>) -> Self {
        self.js.push(source.into());
        self
    }

    /// Append a stylesheet for `medium`.
    ///
    /// Plain paths take `medium` as their `media` attribute when converted.
    #[must_use]
    pub fn css(mut self, medium: impl Into<String>, source: impl Into<CssSource>) -> Self {
        self.css.entry(medium.into()).or_default().push(source.into());
        self
    }

    /// Declared scripts in order.
    pub fn js_sources(&self) -> &[JsSource] {
        &self.js
    }

    /// Declared stylesheets by medium, media sorted by name.
    pub fn css_sources(&self) -> &BTreeMap<String, Vec<CssSource>> {
        &self.css
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.values().all(Vec::is_empty)
    }

    /// One stylesheet list (media in sorted order) followed by one script list.
    ///
    /// Plain stylesheet paths take their medium as the `media` attribute.
    pub fn to_media(&self) -> Media {
        let css = self
            .css
            .iter()
            .flat_map(|(medium, sources)| {
                sources.iter().map(move |source| match source {
                    CssSource::Path(path) => {
                        Asset::Css(Css::new(path.clone()).media(medium.clone()))
                    }
                    CssSource::Css(css) => Asset::Css(css.clone()),
                })
            })
            .collect();

        let js = self
            .js
            .iter()
            .map(|source| match source {
                JsSource::Path(path) => Asset::Js(Js::new(path.clone())),
                JsSource::Asset(asset) => asset.clone(),
            })
            .collect();

        let mut media = Media::new();
        media.push_list(css);
        media.push_list(js);
        media
    }
}

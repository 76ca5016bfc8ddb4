//! Asset value types and the [`Asset`] enum held by [`Media`](crate::media::Media).
//!
//! - [`Js`] - `<script src="…">`
//! - [`Css`] - `<link rel="stylesheet">` or inline `<style>`
//! - [`Json`] - `<script type="application/json">`
//! - [`ImportMap`] / [`ImportMapImport`] - import map fragments, merged into a
//!   single `<script type="importmap">` when a media collection renders
//!
//! Equality of `Js`, `Css` and `Json` values is equality of their rendered
//! HTML (with paths as declared), so assets built independently still
//! deduplicate.

mod css;
mod js;
mod json;

pub use css::Css;
pub use js::Js;
pub use json::Json;

use crate::constants::NONCE_ATTR;
use crate::core::Result;
use crate::html::{Attrs, SafeHtml};
use crate::importmap::{ImportMap, ImportMapImport};
use crate::static_files::StaticResolver;

/// Anything a media list can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Js(Js),
    Css(Css),
    Json(Json),
    ImportMap(ImportMap),
    ImportMapImport(ImportMapImport),
}

impl Asset {
    /// Render on its own. Import map entries render to nothing.
    pub fn render(&self, resolver: &dyn StaticResolver) -> Result<SafeHtml> {
        match self {
            Asset::Js(js) => js.render(resolver),
            Asset::Css(css) => css.render(resolver),
            Asset::Json(json) => json.render(),
            Asset::ImportMap(map) => map.render(),
            Asset::ImportMapImport(_) => Ok(SafeHtml::default()),
        }
    }

    /// Whether this asset is folded into the combined import map.
    pub fn is_import_map(&self) -> bool {
        matches!(self, Asset::ImportMap(_) | Asset::ImportMapImport(_))
    }

    /// Tag attributes; import map entries have none.
    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Asset::Js(js) => Some(js.attrs()),
            Asset::Css(css) => Some(css.attrs()),
            Asset::Json(json) => Some(json.attrs()),
            Asset::ImportMap(map) => Some(map.attrs()),
            Asset::ImportMapImport(_) => None,
        }
    }

    /// Whether the asset declares a usable nonce. `nonce = false` or an empty
    /// nonce does not count.
    pub fn has_nonce(&self) -> bool {
        self.attrs().is_some_and(|attrs| attrs.is_set(NONCE_ATTR))
    }

    /// A copy carrying `nonce`, unless the asset already declares one.
    ///
    /// `self` is never modified.
    #[must_use]
    pub fn with_nonce(&self, nonce: &str) -> Asset {
        let mut copy = self.clone();
        if self.has_nonce() {
            return copy;
        }
        let attrs = match &mut copy {
            Asset::Js(js) => js.attrs_mut(),
            Asset::Css(css) => css.attrs_mut(),
            Asset::Json(json) => json.attrs_mut(),
            Asset::ImportMap(map) => map.attrs_mut(),
            Asset::ImportMapImport(_) => return copy,
        };
        attrs.insert(NONCE_ATTR, nonce);
        copy
    }
}

impl From<Js> for Asset {
    fn from(js: Js) -> Self {
        Asset::Js(js)
    }
}

impl From<Css> for Asset {
    fn from(css: Css) -> Self {
        Asset::Css(css)
    }
}

impl From<Json> for Asset {
    fn from(json: Json) -> Self {
        Asset::Json(json)
    }
}

impl From<ImportMap> for Asset {
    fn from(map: ImportMap) -> Self {
        Asset::ImportMap(map)
    }
}

impl From<ImportMapImport> for Asset {
    fn from(entry: ImportMapImport) -> Self {
        Asset::ImportMapImport(entry)
    }
}

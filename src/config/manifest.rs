//! Media manifest: widget asset declarations in TOML.
//!
//! ```toml
//! [importmap_attrs]
//! data-turbo-track = "reload"
//!
//! [[widgets]]
//! name = "editor"
//! js = [
//!     "editor/editor.js",
//!     { src = "editor/module.js", attrs = { type = "module" } },
//!     { json = { toolbar = ["bold", "italic"] }, id = "editor-config" },
//! ]
//! css = { all = ["editor/editor.css"], print = [{ inline = "nav { display: none; }" }] }
//!
//! [widgets.importmap.imports]
//! "editor-lib" = "/static/editor/lib.js"
//! ```
//!
//! Each widget becomes a [`Media`]; the manifest's media is their combination
//! in declaration order.

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::asset::{Asset, Css, Js, Json};
use crate::core::{AssetError, Result};
use crate::html::Attrs;
use crate::importmap::ImportMap;
use crate::media::{FormsMedia, Media};

/// A `js` entry: a path, a script with attributes, or a JSON data block.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsDeclaration {
    Path(String),
    Script {
        src: String,
        #[serde(default)]
        attrs: Attrs,
    },
    Data {
        json: Map<String, Value>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        attrs: Attrs,
    },
}

/// A `css` entry: a path, a stylesheet with attributes, or inline CSS.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CssDeclaration {
    Path(String),
    Stylesheet {
        src: String,
        #[serde(default)]
        attrs: Attrs,
    },
    Inline {
        inline: String,
        #[serde(default)]
        attrs: Attrs,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetDeclaration {
    pub name: String,
    #[serde(default)]
    pub js: Vec<JsDeclaration>,
    /// Stylesheets keyed by medium.
    #[serde(default)]
    pub css: IndexMap<String, Vec<CssDeclaration>>,
    #[serde(default)]
    pub importmap: Option<ImportMap>,
}

impl WidgetDeclaration {
    pub fn to_media(&self) -> Media {
        let mut forms = FormsMedia::new();
        for (medium, declarations) in &self.css {
            for declaration in declarations {
                forms = match declaration {
                    CssDeclaration::Path(path) => forms.css(medium.clone(), path.clone()),
                    CssDeclaration::Stylesheet { src, attrs } => forms.css(
                        medium.clone(),
                        Css::new(src.clone()).media(medium.clone()).attrs_from(attrs),
                    ),
                    CssDeclaration::Inline { inline, attrs } => forms.css(
                        medium.clone(),
                        Css::inline(inline.clone()).media(medium.clone()).attrs_from(attrs),
                    ),
                };
            }
        }
        for declaration in &self.js {
            forms = match declaration {
                JsDeclaration::Path(path) => forms.js(path.clone()),
                JsDeclaration::Script { src, attrs } => {
                    forms.js(Js::with_attrs(src.clone(), attrs.clone()))
                }
                JsDeclaration::Data { json, id, attrs } => {
                    let mut data = Json::new(json.clone()).attrs_from(attrs);
                    if let Some(id) = id {
                        data = data.id(id.clone());
                    }
                    forms.js(data)
                }
            };
        }

        let media = forms.to_media();
        match &self.importmap {
            Some(importmap) if importmap.has_entries() => {
                media.combine(&Media::from_assets([Asset::ImportMap(importmap.clone())]))
            }
            _ => media,
        }
    }
}

/// The whole manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaManifest {
    /// Attributes of the combined import map tag.
    #[serde(default)]
    pub importmap_attrs: Attrs,
    #[serde(default)]
    pub widgets: Vec<WidgetDeclaration>,
}

impl MediaManifest {
    /// Parse manifest text; `file` names the source in errors.
    ///
    /// # Errors
    ///
    /// [`AssetError::ManifestParseError`] for invalid TOML, unknown entry
    /// shapes, and empty or repeated widget names.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let manifest: MediaManifest =
            toml::from_str(content).map_err(|e| AssetError::ManifestParseError {
                file: file.to_string(),
                reason: e.to_string(),
            })?;
        manifest.validate(file)?;
        Ok(manifest)
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read media manifest: {}", path.display()))?;
        let manifest = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(
            "Loaded {} widgets from {}",
            manifest.widgets.len(),
            path.display()
        );
        Ok(manifest)
    }

    fn validate(&self, file: &str) -> Result<()> {
        let mut names = HashSet::new();
        for widget in &self.widgets {
            if widget.name.trim().is_empty() {
                return Err(AssetError::ManifestParseError {
                    file: file.to_string(),
                    reason: "widget name must not be empty".to_string(),
                });
            }
            if !names.insert(widget.name.as_str()) {
                return Err(AssetError::ManifestParseError {
                    file: file.to_string(),
                    reason: format!("duplicate widget '{}'", widget.name),
                });
            }
        }
        Ok(())
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetDeclaration> {
        self.widgets.iter().find(|widget| widget.name == name)
    }

    /// All widgets combined in declaration order.
    pub fn to_media(&self) -> Media {
        self.widgets
            .iter()
            .fold(Media::new(), |media, widget| media.combine(&widget.to_media()))
            .with_importmap_attrs(self.importmap_attrs.clone())
    }
}

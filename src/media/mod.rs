//! Media collections: ordered lists of assets from many widgets and forms.
//!
//! A [`Media`] keeps one list per contributing source instead of a single flat
//! list. Combining two collections concatenates their lists and skips lists that
//! are already present, so a sub-widget shared by two forms is declared once.
//! Rendering flattens the lists, drops repeated tags and folds every import map
//! fragment into one `<script type="importmap">` emitted first.
//!
//! ```rust
//! use js_asset::{ImportMapImport, Js, Media, PrefixResolver};
//!
//! let media = Media::from_js(["a.js", "b.js"])
//!     .combine(&Media::from_js(["b.js", "c.js"]))
//!     .combine(&Media::from_assets([
//!         js_asset::Asset::from(Js::new("a.js")),
//!         ImportMapImport::new("library-a", "/static/library-a.abcdef.js").into(),
//!     ]));
//!
//! let html = media.render(&PrefixResolver::new("/static/")).unwrap();
//! assert_eq!(
//!     html.as_str(),
//!     "<script type=\"importmap\">{\"imports\": {\"library-a\": \"/static/library-a.abcdef.js\"}}</script>\n\
//!      <script src=\"/static/a.js\"></script>\n\
//!      <script src=\"/static/b.js\"></script>\n\
//!      <script src=\"/static/c.js\"></script>"
//! );
//! ```

mod forms;

pub use forms::{CssSource, FormsMedia, JsSource};

use std::collections::HashSet;

use crate::asset::{Asset, Css, Js};
use crate::core::{AssetError, Result};
use crate::html::{Attrs, SafeHtml};
use crate::importmap::ImportMap;
use crate::static_files::StaticResolver;

/// Ordered list-of-lists of assets plus the attributes of the combined import map tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    lists: Vec<Vec<Asset>>,
    importmap_attrs: Attrs,
}

impl Media {
    /// An empty collection. It renders to the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding one list.
    pub fn from_assets<I, A>(assets: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Asset>,
    {
        let mut media = Self::new();
        media.push_list(assets.into_iter().map(Into::into).collect());
        media
    }

    /// One list of scripts from plain paths.
    pub fn from_js<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_assets(paths.into_iter().map(Js::new))
    }

    /// One list of stylesheets for `medium` from plain paths.
    pub fn from_css<I, S>(medium: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_assets(paths.into_iter().map(|path| Css::new(path).media(medium)))
    }

    /// Append a list unless it is empty or equal to a list already held.
    pub fn push_list(&mut self, list: Vec<Asset>) {
        if list.is_empty() {
            return;
        }
        if self.lists.contains(&list) {
            tracing::trace!("Skipping duplicate asset list of {} entries", list.len());
            return;
        }
        self.lists.push(list);
    }

    /// The held asset lists, in the order they were added.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use js_asset::Media;
    ///
    /// let media = Media::from_js(["a.js"]).combine(&Media::from_js(["a.js"]));
    /// assert_eq!(media.lists().len(), 1);
    /// ```
    pub fn lists(&self) -> &[Vec<Asset>] {
        &self.lists
    }

    /// All assets in list order, duplicates included.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.lists.iter().flatten()
    }

    /// True when no list holds an asset.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Attributes put on the combined `<script type="importmap">` tag.
    pub fn importmap_attrs(&self) -> &Attrs {
        &self.importmap_attrs
    }

    /// Replace the attributes of the combined import map tag.
    ///
    /// # Arguments
    ///
    /// * `attrs` - attributes such as `nonce` or `data-turbo-track`; they are
    ///   merged with the attributes of any [`ImportMap`] held in the lists
    #[must_use]
    pub fn with_importmap_attrs(mut self, attrs: Attrs) -> Self {
        self.importmap_attrs = attrs;
        self
    }

    /// A new collection with the lists of `self` followed by the new lists of `other`.
    ///
    /// Import map attributes are merged; those of `other` win.
    #[must_use]
    pub fn combine(&self, other: &Media) -> Media {
        let mut combined = self.clone();
        for list in &other.lists {
            combined.push_list(list.clone());
        }
        combined.importmap_attrs.extend_from(&other.importmap_attrs);
        tracing::trace!(
            "Combined media: {} + {} lists -> {}",
            self.lists.len(),
            other.lists.len(),
            combined.lists.len()
        );
        combined
    }

    /// Every import map fragment folded into one map, in encounter order.
    pub fn importmap(&self) -> ImportMap {
        let mut importmap = ImportMap::new().with_attrs(self.importmap_attrs.clone());
        for asset in self.assets() {
            match asset {
                Asset::ImportMap(map) => importmap.update(map),
                Asset::ImportMapImport(entry) => importmap.add_entry(entry),
                _ => {}
            }
        }
        importmap
    }

    /// Only the combined import map tag, or nothing when no imports are declared.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::SerializationError`] if the map cannot be encoded.
    pub fn render_importmap(&self) -> Result<SafeHtml> {
        self.importmap().render()
    }

    /// Render the combined import map followed by each distinct asset, one per line.
    ///
    /// # Errors
    ///
    /// Fails with the first error of the resolver or of a JSON payload; no
    /// partial output is returned.
    pub fn render(&self, resolver: &dyn StaticResolver) -> Result<SafeHtml> {
        let mut fragments = Vec::new();

        let importmap = self.render_importmap()?;
        if !importmap.is_empty() {
            fragments.push(importmap.into_string());
        }

        let mut seen = HashSet::new();
        for asset in self.assets().filter(|asset| !asset.is_import_map()) {
            let html = asset.render(resolver)?.into_string();
            if html.is_empty() || !seen.insert(html.clone()) {
                continue;
            }
            fragments.push(html);
        }

        tracing::debug!("Rendered media with {} tags", fragments.len());
        Ok(SafeHtml::from_trusted(fragments.join("\n")))
    }

    /// The same lists with every asset passed through `f`.
    pub(crate) fn map_assets(&self, f: impl Fn(&Asset) -> Asset) -> Media {
        Media {
            lists: self
                .lists
                .iter()
                .map(|list| list.iter().map(&f).collect())
                .collect(),
            importmap_attrs: self.importmap_attrs.clone(),
        }
    }

    pub(crate) fn importmap_attrs_mut(&mut self) -> &mut Attrs {
        &mut self.importmap_attrs
    }
}

impl From<FormsMedia> for Media {
    fn from(forms: FormsMedia) -> Self {
        forms.to_media()
    }
}

/// Either kind of collection a widget or form may declare.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetCollection {
    Media(Media),
    Forms(FormsMedia),
}

impl AssetCollection {
    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetCollection::Media(_) => "Media",
            AssetCollection::Forms(_) => "FormsMedia",
        }
    }

    /// Combine two collections, keeping the order of operands.
    ///
    /// # Errors
    ///
    /// Two [`FormsMedia`] values cannot be combined here and yield
    /// [`AssetError::UnsupportedOperand`].
    pub fn combine(&self, other: &AssetCollection) -> Result<AssetCollection> {
        let combined = match (self, other) {
            (AssetCollection::Media(left), AssetCollection::Media(right)) => left.combine(right),
            (AssetCollection::Media(left), AssetCollection::Forms(right)) => {
                left.combine(&right.to_media())
            }
            (AssetCollection::Forms(left), AssetCollection::Media(right)) => {
                left.to_media().combine(right)
            }
            (AssetCollection::Forms(_), AssetCollection::Forms(_)) => {
                return Err(AssetError::UnsupportedOperand {
                    left: self.kind().to_string(),
                    right: other.kind().to_string(),
                });
            }
        };
        Ok(AssetCollection::Media(combined))
    }

    /// The collection as [`Media`], converting plain declarations.
    pub fn to_media(&self) -> Media {
        match self {
            AssetCollection::Media(media) => media.clone(),
            AssetCollection::Forms(forms) => forms.to_media(),
        }
    }

    /// Render through [`Media::render`].
    pub fn render(&self, resolver: &dyn StaticResolver) -> Result<SafeHtml> {
        self.to_media().render(resolver)
    }
}

impl From<Media> for AssetCollection {
    fn from(media: Media) -> Self {
        AssetCollection::Media(media)
    }
}

impl From<FormsMedia> for AssetCollection {
    fn from(forms: FormsMedia) -> Self {
        AssetCollection::Forms(forms)
    }
}

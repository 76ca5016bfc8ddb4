//! js-asset - script, stylesheet and import map tags for server-rendered pages
//!
//! Widgets and forms declare the assets they need; js-asset turns those
//! declarations into HTML tags. Declarations from many sources are combined
//! into one [`Media`] collection which renders every distinct tag once, in
//! first-seen order, with all import map fragments merged into a single
//! `<script type="importmap">` in front.
//!
//! # Architecture Overview
//!
//! - Asset values ([`Js`], [`Css`], [`Json`]) render one tag each. Attributes
//!   keep insertion order; `true` renders a bare attribute and `false` omits it.
//! - Relative paths go through a [`StaticResolver`]; `http://`, `https://` and
//!   `/` paths are used as written.
//! - [`ImportMap`] values and [`ImportMapImport`] entries merge deeply, the
//!   later entry winning.
//! - The CSP layer copies a collection with a `nonce` on every tag and keeps the
//!   current request's nonce in task-local storage.
//!
//! # Core Modules
//!
//! - [`html`] - Attribute mappings, escaping, [`SafeHtml`] and script-safe JSON
//! - [`static_files`] - [`PathRef`] and static path resolvers
//! - [`asset`] - Asset value types and the [`Asset`] enum
//! - [`importmap`] - Import map accumulation and rendering
//! - [`media`] - [`Media`], [`FormsMedia`] and [`AssetCollection`]
//! - [`csp`] - Nonce injection, request-scoped nonces and the policy header
//! - [`templating`] - Tera context for rendered media
//! - [`config`] - Settings and media manifests
//! - [`cli`] - The `js-asset` command line tool
//! - [`core`] - Error types
//!
//! # Example
//!
//! ```rust
//! use js_asset::{Css, Js, Media, PrefixResolver};
//!
//! let widget = Media::from_assets([
//!     js_asset::Asset::from(Js::new("widget.js")),
//!     Css::new("widget.css").into(),
//! ]);
//! let form = Media::from_js(["form.js", "widget.js"]);
//!
//! let html = form.combine(&widget).render(&PrefixResolver::new("/static/")).unwrap();
//! assert_eq!(
//!     html.as_str(),
//!     "<script src=\"/static/form.js\"></script>\n\
//!      <script src=\"/static/widget.js\"></script>\n\
//!      <link href=\"/static/widget.css\" media=\"all\" rel=\"stylesheet\">"
//! );
//! ```

pub mod asset;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod csp;
pub mod html;
pub mod importmap;
pub mod media;
pub mod static_files;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use asset::{Asset, Css, Js, Json};
pub use crate::core::{AssetError, Result};
pub use html::{AttrValue, Attrs, SafeHtml};
pub use importmap::{ImportMap, ImportMapImport};
pub use media::{AssetCollection, CssSource, FormsMedia, JsSource, Media};
pub use static_files::{ManifestResolver, PathRef, PrefixResolver, StaticResolver, Unresolved};

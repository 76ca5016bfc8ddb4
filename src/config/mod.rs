//! Configuration for js-asset.
//!
//! Two files drive the command line tool:
//!
//! 1. **Settings** (`js-asset.toml`, or the file named by `JS_ASSET_SETTINGS`):
//!    static URL prefix, optional static files manifest and the `[csp]` table.
//! 2. **Media manifest**: the widgets of a page and the assets each declares.
//!
//! # Modules
//!
//! - `parser` - Generic TOML parsing with file path context
//! - `settings` - [`Settings`] loading and validation
//! - `manifest` - [`MediaManifest`] and its widget declarations

mod manifest;
mod parser;
mod settings;

pub use manifest::{CssDeclaration, JsDeclaration, MediaManifest, WidgetDeclaration};
pub use parser::parse_config;
pub use settings::Settings;

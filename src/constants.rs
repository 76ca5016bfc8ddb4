//! Constants used throughout js-asset.
//!
//! Default settings values, attribute and header names, and environment
//! variables live here so they are discoverable in one place.

/// Default URL prefix for relative static paths.
pub const DEFAULT_STATIC_URL: &str = "/static/";

/// Medium used by stylesheets that do not name one.
pub const DEFAULT_CSS_MEDIA: &str = "all";

/// Number of random bytes in a generated CSP nonce (before base64).
pub const DEFAULT_NONCE_LENGTH: usize = 16;

/// Attribute carrying the CSP nonce on script and style tags.
pub const NONCE_ATTR: &str = "nonce";

/// Response header written by [`add_csp_header`](crate::csp::add_csp_header).
pub const CSP_HEADER: &str = "Content-Security-Policy";

/// Environment variable pointing at the settings file.
pub const SETTINGS_ENV_VAR: &str = "JS_ASSET_SETTINGS";

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "js-asset.toml";

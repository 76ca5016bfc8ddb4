//! Static path references and their resolution to URLs.
//!
//! Asset sources are a [`PathRef`]: absolute references (`http://`, `https://`
//! or a leading `/`) are emitted verbatim, relative ones go through a
//! [`StaticResolver`], and inline text is embedded as-is.
//!
//! Two resolvers are provided:
//! - [`PrefixResolver`] joins a `STATIC_URL`-style prefix with the path
//! - [`ManifestResolver`] maps paths to hashed file names from a
//!   `staticfiles.json` manifest before joining the prefix
//!
//! Any `Fn(&str) -> Result<String>` closure is a resolver too.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::core::{AssetError, Result};

/// Where an asset's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathRef {
    /// URL or root-relative path, used verbatim.
    Absolute(String),
    /// Path relative to the static root, resolved at render time.
    Relative(String),
    /// Literal content (inline CSS).
    Inline(String),
}

impl PathRef {
    /// Classify a declared path as absolute or relative.
    pub fn parse(path: impl Into<String>) -> Self {
        let path = path.into();
        if is_absolute(&path) {
            PathRef::Absolute(path)
        } else {
            PathRef::Relative(path)
        }
    }

    /// Inline content, never resolved.
    pub fn inline(text: impl Into<String>) -> Self {
        PathRef::Inline(text.into())
    }

    /// The path or text exactly as it was declared.
    pub fn as_declared(&self) -> &str {
        match self {
            PathRef::Absolute(s) | PathRef::Relative(s) | PathRef::Inline(s) => s,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, PathRef::Inline(_))
    }

    /// Produce the final URL (or inline text).
    ///
    /// # Errors
    ///
    /// Propagates the resolver's error for relative paths.
    pub fn resolve(&self, resolver: &dyn StaticResolver) -> Result<String> {
        match self {
            PathRef::Absolute(path) | PathRef::Inline(path) => Ok(path.clone()),
            PathRef::Relative(path) => resolver.resolve(path),
        }
    }
}

impl From<&str> for PathRef {
    fn from(path: &str) -> Self {
        PathRef::parse(path)
    }
}

impl From<String> for PathRef {
    fn from(path: String) -> Self {
        PathRef::parse(path)
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/')
}

/// Maps a relative static path to an absolute URL.
pub trait StaticResolver {
    /// # Errors
    ///
    /// Implementations return [`AssetError::StaticResolution`] when the path is unknown.
    fn resolve(&self, relative_path: &str) -> Result<String>;
}

impl<F> StaticResolver for F
where
    F: Fn(&str) -> Result<String>,
{
    fn resolve(&self, relative_path: &str) -> Result<String> {
        self(relative_path)
    }
}

/// Leaves relative paths untouched.
///
/// Used for the canonical rendering behind asset equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolved;

impl StaticResolver for Unresolved {
    fn resolve(&self, relative_path: &str) -> Result<String> {
        Ok(relative_path.to_string())
    }
}

/// Joins a URL prefix such as `/static/` with the relative path.
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    prefix: String,
}

impl PrefixResolver {
    /// Join relative paths onto `prefix`, e.g. `/static/`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.into()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_STATIC_URL)
    }
}

impl StaticResolver for PrefixResolver {
    fn resolve(&self, relative_path: &str) -> Result<String> {
        Ok(format!("{}{}", self.prefix, relative_path.trim_start_matches('/')))
    }
}

fn normalize_prefix(mut prefix: String) -> String {
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    paths: HashMap<String, String>,
}

/// Resolves through a `staticfiles.json` manifest of hashed file names.
///
/// In strict mode (the default) a path missing from the manifest is an error;
/// otherwise it falls back to the unhashed name.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    prefix: PrefixResolver,
    paths: HashMap<String, String>,
    strict: bool,
}

impl ManifestResolver {
    /// A resolver mapping declared paths to hashed names under `prefix`.
    ///
    /// Strict by default: a path missing from `paths` is an error.
    pub fn new(prefix: impl Into<String>, paths: HashMap<String, String>) -> Self {
        Self {
            prefix: PrefixResolver::new(prefix),
            paths,
            strict: true,
        }
    }

    /// With `strict` off, missing paths fall back to `prefix` joined with the path.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse manifest JSON of the form `{"version": "1.1", "paths": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::ConfigError`] when the JSON is malformed.
    pub fn from_json(prefix: impl Into<String>, json: &str) -> Result<Self> {
        let manifest: ManifestFile =
            serde_json::from_str(json).map_err(|e| AssetError::ConfigError {
                message: format!("invalid static files manifest: {e}"),
            })?;
        Ok(Self::new(prefix, manifest.paths))
    }

    /// Read and parse a manifest file.
    pub async fn load(prefix: impl Into<String>, path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await.with_context(|| {
            format!("Failed to read static files manifest: {}", path.display())
        })?;
        let resolver = Self::from_json(prefix, &content)
            .with_context(|| format!("Failed to parse static files manifest: {}", path.display()))?;
        tracing::debug!(
            "Loaded {} hashed paths from {}",
            resolver.paths.len(),
            path.display()
        );
        Ok(resolver)
    }
}

impl StaticResolver for ManifestResolver {
    fn resolve(&self, relative_path: &str) -> Result<String> {
        match self.paths.get(relative_path) {
            Some(hashed) => self.prefix.resolve(hashed),
            None if self.strict => Err(AssetError::StaticResolution {
                path: relative_path.to_string(),
                reason: "missing from the static files manifest".to_string(),
            }),
            None => self.prefix.resolve(relative_path),
        }
    }
}

//! Project settings (`js-asset.toml`).
//!
//! ```toml
//! static_url = "/static/"
//! manifest = "staticfiles.json"
//!
//! [csp]
//! enabled = true
//! nonce_length = 16
//! default_src = ["'self'"]
//! script_src = ["https://cdn.example.com"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::parse_config;
use crate::constants::{DEFAULT_SETTINGS_FILE, DEFAULT_STATIC_URL, SETTINGS_ENV_VAR};
use crate::core::AssetError;
use crate::csp::CspConfig;
use crate::static_files::{ManifestResolver, PrefixResolver, StaticResolver};

fn default_static_url() -> String {
    DEFAULT_STATIC_URL.to_string()
}

/// Settings for rendering and CSP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// URL prefix for relative static paths.
    #[serde(default = "default_static_url")]
    pub static_url: String,

    /// `staticfiles.json`-style manifest mapping paths to hashed names.
    ///
    /// Relative paths are taken from the directory of the settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    #[serde(default)]
    pub csp: CspConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            static_url: default_static_url(),
            manifest: None,
            csp: CspConfig::default(),
        }
    }
}

impl Settings {
    /// Load from `JS_ASSET_SETTINGS`, or from `js-asset.toml` in the working
    /// directory when that file exists. Defaults otherwise.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, falling back to [`load`](Self::load) rules.
    ///
    /// # Errors
    ///
    /// An explicit path (argument or environment) must exist; the implicit
    /// `js-asset.toml` may be absent.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path.or_else(Self::env_path) {
            return Self::load_from(&path).await;
        }

        let path = PathBuf::from(DEFAULT_SETTINGS_FILE);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No {} found, using default settings", DEFAULT_SETTINGS_FILE);
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut settings: Settings = parse_config(path).await?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        if let Some(manifest) = settings.manifest.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            settings.manifest = Some(base.join(manifest));
        }

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings file named by `JS_ASSET_SETTINGS`, if set and non-empty.
    pub fn env_path() -> Option<PathBuf> {
        std::env::var_os(SETTINGS_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// # Errors
    ///
    /// [`AssetError::ConfigError`] for an empty `static_url` or a zero nonce length.
    pub fn validate(&self) -> crate::core::Result<()> {
        if self.static_url.is_empty() {
            return Err(AssetError::ConfigError {
                message: "static_url must not be empty".to_string(),
            });
        }
        if self.csp.nonce_length == 0 {
            return Err(AssetError::ConfigError {
                message: "csp.nonce_length must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The resolver for relative static paths: hashed names from the manifest
    /// when one is configured, the plain prefix otherwise.
    pub async fn resolver(&self) -> Result<Box<dyn StaticResolver + Send + Sync>> {
        match &self.manifest {
            Some(path) => Ok(Box::new(ManifestResolver::load(self.static_url.clone(), path).await?)),
            None => Ok(Box::new(PrefixResolver::new(self.static_url.clone()))),
        }
    }
}

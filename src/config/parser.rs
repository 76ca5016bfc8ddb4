//! Generic TOML parsing with file path context.
//!
//! ```rust,no_run
//! use js_asset::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct MyConfig {
//!     static_url: String,
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config: MyConfig = parse_config(Path::new("js-asset.toml")).await?;
//! println!("Static files under {}", config.static_url);
//! # Ok(())
//! # }
//! ```
//!
//! Errors name the file and keep the I/O or TOML error as their cause:
//!
//! ```text
//! Failed to parse config file: /path/to/js-asset.toml
//! Caused by:
//!     invalid type: integer `1`, expected a string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Read a TOML file and deserialize it into `T`.
///
/// # Errors
///
/// Fails when the file cannot be read or does not match `T`.
pub async fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

//! Command-line interface for js-asset.
//!
//! # Commands
//!
//! - `render` - Render the media of a widget manifest, optionally through a template
//! - `nonce` - Print a fresh CSP nonce
//! - `csp-header` - Print the `Content-Security-Policy` header for a nonce
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging on stderr
//! - `--quiet` / `-q` - No logging at all
//! - `--settings` / `-s` - Settings file (defaults to `JS_ASSET_SETTINGS`, then `./js-asset.toml`)
//!
//! # Example
//!
//! ```bash
//! js-asset render media.toml --generate-nonce --template page.html
//! js-asset csp-header --nonce "$NONCE"
//! ```

mod csp_header;
mod nonce;
mod render;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Runtime options derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, `None` disables logging.
    pub log_level: Option<String>,
    pub settings_path: Option<PathBuf>,
}

impl CliConfig {
    /// The filter directive for the stderr subscriber.
    ///
    /// `--quiet` turns logging off and `--verbose` forces `debug` regardless of
    /// the environment. Otherwise a non-empty `rust_log` (the value of
    /// `RUST_LOG`) takes precedence over the default level.
    pub fn filter_directive(&self, rust_log: Option<&str>) -> String {
        match (self.log_level.as_deref(), rust_log) {
            (None, _) => "off".to_string(),
            (Some("debug"), _) => "debug".to_string(),
            (Some(_), Some(env)) if !env.trim().is_empty() => env.to_string(),
            (Some(level), _) => level.to_string(),
        }
    }

    /// Install the stderr subscriber using [`CliConfig::filter_directive`].
    pub fn init_logging(&self) {
        let rust_log = std::env::var("RUST_LOG").ok();
        let directive = self.filter_directive(rust_log.as_deref());
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("off"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub async fn load_settings(&self) -> Result<Settings> {
        Settings::load_with_optional(self.settings_path.clone()).await
    }
}

#[derive(Parser)]
#[command(
    name = "js-asset",
    about = "Render script, stylesheet and import map tags for widget media",
    version,
    long_about = "js-asset combines the asset declarations of widgets into deduplicated \
                  HTML tags with a single import map, and helps attach CSP nonces."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the settings file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the media declared in a manifest
    Render(render::RenderCommand),

    /// Generate a CSP nonce
    Nonce(nonce::NonceCommand),

    /// Print the Content-Security-Policy header for a nonce
    CspHeader(csp_header::CspHeaderCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            settings_path: self.settings.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let settings = config.load_settings().await?;
        match self.command {
            Commands::Render(cmd) => cmd.execute(&settings).await,
            Commands::Nonce(cmd) => cmd.execute(&settings),
            Commands::CspHeader(cmd) => cmd.execute(&settings),
        }
    }
}

//! `js-asset csp-header`: print the policy header for a nonce.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Settings;
use crate::constants::CSP_HEADER;
use crate::core::AssetError;
use crate::csp::generate_nonce;

#[derive(Args)]
pub struct CspHeaderCommand {
    /// Nonce used in script-src and style-src (generated when omitted)
    #[arg(long)]
    nonce: Option<String>,

    /// Print only the header value
    #[arg(long)]
    value_only: bool,
}

impl CspHeaderCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        if !settings.csp.enabled {
            eprintln!(
                "{} CSP is disabled in the settings; responses will not carry this header",
                "warning:".yellow().bold()
            );
        }
        println!("{}", self.run(settings)?);
        Ok(())
    }

    pub(crate) fn run(&self, settings: &Settings) -> Result<String> {
        let nonce = self
            .nonce
            .clone()
            .unwrap_or_else(|| generate_nonce(settings.csp.nonce_length));

        let Some(policy) = settings.csp.header_value(&nonce) else {
            return Err(AssetError::ConfigError {
                message: "csp.default_src is not configured".to_string(),
            }
            .into());
        };

        if self.value_only {
            Ok(policy)
        } else {
            Ok(format!("{CSP_HEADER}: {policy}"))
        }
    }
}

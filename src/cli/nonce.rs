//! `js-asset nonce`: print a fresh nonce.

use anyhow::Result;
use clap::Args;

use crate::config::Settings;
use crate::core::AssetError;
use crate::csp::generate_nonce;

#[derive(Args)]
pub struct NonceCommand {
    /// Random bytes before base64 encoding (defaults to csp.nonce_length)
    #[arg(short, long)]
    length: Option<usize>,
}

impl NonceCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        println!("{}", self.run(settings)?);
        Ok(())
    }

    pub(crate) fn run(&self, settings: &Settings) -> Result<String> {
        let length = self.length.unwrap_or(settings.csp.nonce_length);
        if length == 0 {
            return Err(AssetError::ConfigError {
                message: "nonce length must be at least 1".to_string(),
            }
            .into());
        }
        Ok(generate_nonce(length))
    }
}

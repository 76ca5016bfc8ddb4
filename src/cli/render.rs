//! `js-asset render`: print the tags of a widget manifest.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;

use crate::config::{MediaManifest, Settings};
use crate::csp::{apply_nonce, generate_nonce};
use crate::media::Media;
use crate::static_files::StaticResolver;
use crate::templating::{media_context, render_template};

#[derive(Args)]
pub struct RenderCommand {
    /// Media manifest listing the widgets
    manifest: PathBuf,

    /// Only render these widgets, in manifest order
    #[arg(short, long = "widget")]
    widgets: Vec<String>,

    /// Nonce to put on every tag
    #[arg(long, conflicts_with = "generate_nonce")]
    nonce: Option<String>,

    /// Put a freshly generated nonce on every tag
    #[arg(long)]
    generate_nonce: bool,

    /// Override the static URL prefix from the settings
    #[arg(long)]
    static_url: Option<String>,

    /// Tera template receiving `media`, `importmap` and `csp_nonce`
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let output = self.run(settings).await?;
        println!("{output}");
        Ok(())
    }

    pub(crate) async fn run(self, settings: &Settings) -> Result<String> {
        let mut settings = settings.clone();
        if let Some(static_url) = self.static_url.clone() {
            settings.static_url = static_url;
        }
        settings.validate()?;

        let manifest = MediaManifest::load(&self.manifest).await?;
        let media = self.select(&manifest)?;

        let nonce = match (&self.nonce, self.generate_nonce) {
            (Some(nonce), _) => Some(nonce.clone()),
            (None, true) => Some(generate_nonce(settings.csp.nonce_length)),
            (None, false) => None,
        };
        if nonce.is_some() {
            tracing::debug!("Applying a CSP nonce to the rendered tags");
        }

        let resolver = settings.resolver().await?;
        let resolver: &dyn StaticResolver = resolver.as_ref();

        match &self.template {
            Some(template_path) => {
                let template = tokio::fs::read_to_string(template_path).await.with_context(|| {
                    format!("Failed to read template: {}", template_path.display())
                })?;
                let context = media_context(&media, resolver, nonce.as_deref())?;
                render_template(&template, &context)
                    .with_context(|| format!("Failed to render {}", template_path.display()))
            }
            None => {
                let media = match &nonce {
                    Some(nonce) => apply_nonce(&media, nonce),
                    None => media,
                };
                Ok(media.render(resolver)?.into_string())
            }
        }
    }

    fn select(&self, manifest: &MediaManifest) -> Result<Media> {
        if self.widgets.is_empty() {
            return Ok(manifest.to_media());
        }

        for name in &self.widgets {
            if manifest.widget(name).is_none() {
                bail!("Widget '{}' is not declared in {}", name, self.manifest.display());
            }
        }

        let media = manifest
            .widgets
            .iter()
            .filter(|widget| self.widgets.contains(&widget.name))
            .fold(Media::new(), |media, widget| media.combine(&widget.to_media()))
            .with_importmap_attrs(manifest.importmap_attrs.clone());
        Ok(media)
    }
}

//! Template integration with Tera.
//!
//! [`media_context`] exposes rendered media to a template:
//!
//! | key         | value                                                  |
//! |-------------|--------------------------------------------------------|
//! | `media`     | every tag of the collection, import map first          |
//! | `importmap` | only the combined `<script type="importmap">` tag      |
//! | `csp_nonce` | the nonce applied to the tags (absent without a nonce) |
//!
//! Templates are rendered with autoescaping, so the HTML values must be
//! emitted with the `safe` filter:
//!
//! ```rust
//! use js_asset::templating::{media_context, render_template};
//! use js_asset::{Media, PrefixResolver};
//!
//! let media = Media::from_js(["app.js"]);
//! let context = media_context(&media, &PrefixResolver::new("/static/"), Some("abc")).unwrap();
//! let html = render_template("<head>{{ media | safe }}</head>", &context).unwrap();
//! assert_eq!(html, r#"<head><script src="/static/app.js" nonce="abc"></script></head>"#);
//! ```

use anyhow::Context as _;
use tera::{Context as TeraContext, Tera};

use crate::core::Result;
use crate::csp::apply_nonce;
use crate::media::Media;
use crate::static_files::StaticResolver;

pub const MEDIA_KEY: &str = "media";
pub const IMPORTMAP_KEY: &str = "importmap";
pub const CSP_NONCE_KEY: &str = "csp_nonce";

/// Build the template context for `media`, applying `nonce` to every tag first.
///
/// # Errors
///
/// Propagates resolver and JSON errors from rendering.
pub fn media_context(
    media: &Media,
    resolver: &dyn StaticResolver,
    nonce: Option<&str>,
) -> Result<TeraContext> {
    let media = match nonce {
        Some(nonce) => apply_nonce(media, nonce),
        None => media.clone(),
    };

    let mut context = TeraContext::new();
    context.insert(MEDIA_KEY, media.render(resolver)?.as_str());
    context.insert(IMPORTMAP_KEY, media.render_importmap()?.as_str());
    if let Some(nonce) = nonce {
        context.insert(CSP_NONCE_KEY, nonce);
    }
    Ok(context)
}

/// Render a one-off template with HTML autoescaping enabled.
pub fn render_template(template: &str, context: &TeraContext) -> anyhow::Result<String> {
    Tera::one_off(template, context, true).context("Failed to render template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importmap::ImportMapImport;
    use crate::static_files::PrefixResolver;

    fn media() -> Media {
        Media::from_assets([ImportMapImport::new("lib", "/static/lib.js")])
            .combine(&Media::from_js(["app.js"]))
    }

    #[test]
    fn test_context_keys() {
        let context = media_context(&media(), &PrefixResolver::default(), Some("n")).unwrap();
        let json = context.into_json();

        assert_eq!(
            json[IMPORTMAP_KEY],
            r#"<script type="importmap" nonce="n">{"imports": {"lib": "/static/lib.js"}}</script>"#
        );
        assert_eq!(json[CSP_NONCE_KEY], "n");
        assert!(json[MEDIA_KEY].as_str().unwrap().ends_with(
            r#"<script src="/static/app.js" nonce="n"></script>"#
        ));
    }

    #[test]
    fn test_context_without_nonce() {
        let context = media_context(&media(), &PrefixResolver::default(), None).unwrap();
        assert!(!context.contains_key(CSP_NONCE_KEY));
    }

    #[test]
    fn test_template_autoescapes_unless_safe() {
        let context = media_context(&media(), &PrefixResolver::default(), None).unwrap();

        let escaped = render_template("{{ importmap }}", &context).unwrap();
        assert!(escaped.starts_with("&lt;script"));

        let html = render_template("{{ importmap | safe }}", &context).unwrap();
        assert!(html.starts_with(r#"<script type="importmap">"#));
    }

    #[test]
    fn test_nonce_in_inline_tag() {
        let context = media_context(&Media::new(), &PrefixResolver::default(), Some("abc")).unwrap();
        let html =
            render_template(r#"<script nonce="{{ csp_nonce }}">init();</script>"#, &context)
                .unwrap();
        assert_eq!(html, r#"<script nonce="abc">init();</script>"#);
    }

    #[test]
    fn test_template_errors() {
        let context = TeraContext::new();
        assert!(render_template("{{ missing }}", &context).is_err());
    }
}

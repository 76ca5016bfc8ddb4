//! Content-Security-Policy support.
//!
//! [`apply_nonce`] returns a copy of a [`Media`] in which every tag carries a
//! `nonce` attribute; the input is never modified. The nonce of the current
//! request is kept in task-local storage (see [`with_request_nonce`]) so that
//! widgets rendered deep inside a request can pick it up through [`csp_media`].
//! [`add_csp_header`] builds the matching `Content-Security-Policy` header.
//!
//! ```rust
//! use js_asset::csp::{apply_nonce, sync_with_request_nonce, csp_media};
//! use js_asset::{Media, PrefixResolver};
//!
//! let media = Media::from_js(["script.js"]);
//! let resolver = PrefixResolver::new("/static/");
//!
//! let with_nonce = apply_nonce(&media, "test-nonce");
//! assert_eq!(
//!     with_nonce.render(&resolver).unwrap().as_str(),
//!     r#"<script src="/static/script.js" nonce="test-nonce"></script>"#
//! );
//!
//! let scoped = sync_with_request_nonce("req-nonce", || csp_media(&media));
//! assert!(scoped.render(&resolver).unwrap().as_str().contains(r#"nonce="req-nonce""#));
//! ```

pub mod nonce;
pub mod policy;

pub use nonce::{current_nonce, generate_nonce, sync_with_request_nonce, with_request_nonce};
pub use policy::{CspConfig, RequestCsp, ResponseHeaders, add_csp_header};

use crate::asset::{Asset, Css, Js};
use crate::constants::NONCE_ATTR;
use crate::media::{CssSource, FormsMedia, JsSource, Media};

/// A copy of `media` with `nonce` on every asset that does not declare one.
///
/// The combined import map tag gets the nonce as well. An empty nonce returns
/// an unchanged copy.
#[must_use]
pub fn apply_nonce(media: &Media, nonce: &str) -> Media {
    if nonce.is_empty() {
        return media.clone();
    }

    let mut copy = media.map_assets(|asset| asset.with_nonce(nonce));
    let attrs = copy.importmap_attrs_mut();
    if !attrs.is_set(NONCE_ATTR) {
        attrs.insert(NONCE_ATTR, nonce);
    }
    copy
}

/// [`apply_nonce`] for plain declarations.
///
/// Plain paths are wrapped into [`Js`] and [`Css`] assets so they can carry the
/// attribute; stylesheet paths keep their medium.
#[must_use]
pub fn apply_nonce_to_forms(forms: &FormsMedia, nonce: &str) -> FormsMedia {
    if nonce.is_empty() {
        return forms.clone();
    }

    let mut copy = FormsMedia::new();
    for (medium, sources) in forms.css_sources() {
        for source in sources {
            let css = match source {
                CssSource::Path(path) => Css::new(path.clone()).media(medium.clone()),
                CssSource::Css(css) => css.clone(),
            };
            copy = copy.css(medium.clone(), nonced_css(css, nonce));
        }
    }
    for source in forms.js_sources() {
        let asset = match source {
            JsSource::Path(path) => Asset::Js(Js::new(path.clone())),
            JsSource::Asset(asset) => asset.clone(),
        };
        copy = copy.js(asset.with_nonce(nonce));
    }
    copy
}

fn nonced_css(css: Css, nonce: &str) -> Css {
    if css.attrs().is_set(NONCE_ATTR) {
        css
    } else {
        css.attr(NONCE_ATTR, nonce)
    }
}

/// `media` with the current request nonce applied, or an unchanged copy
/// outside a request scope.
#[must_use]
pub fn csp_media(media: &Media) -> Media {
    match current_nonce() {
        Some(nonce) => apply_nonce(media, &nonce),
        None => media.clone(),
    }
}

//! Content-Security-Policy settings, header construction and request hooks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;

use super::nonce::{generate_nonce, with_request_nonce};
use crate::constants::{CSP_HEADER, DEFAULT_NONCE_LENGTH};

const fn default_nonce_length() -> usize {
    DEFAULT_NONCE_LENGTH
}

/// The `[csp]` settings table.
///
/// Each source list is optional: an absent list leaves its directive out of the
/// header, while an empty list writes the directive with no sources.
///
/// ```toml
/// [csp]
/// enabled = true
/// default_src = ["'self'"]
/// script_src = ["https://cdn.example.com"]
/// img_src = ["'self'", "data:"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CspConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Random bytes per generated nonce.
    #[serde(default = "default_nonce_length")]
    pub nonce_length: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_src: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_action: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ancestors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_src: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_src: Option<Vec<String>>,
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            nonce_length: DEFAULT_NONCE_LENGTH,
            default_src: None,
            script_src: None,
            style_src: None,
            img_src: None,
            font_src: None,
            connect_src: None,
            frame_src: None,
            object_src: None,
            media_src: None,
            child_src: None,
            form_action: None,
            frame_ancestors: None,
            worker_src: None,
            manifest_src: None,
        }
    }
}

impl CspConfig {
    /// Directives appended after `style-src`, in header order.
    fn extra_directives(&self) -> [(&'static str, &Option<Vec<String>>); 11] {
        [
            ("img-src", &self.img_src),
            ("font-src", &self.font_src),
            ("connect-src", &self.connect_src),
            ("frame-src", &self.frame_src),
            ("object-src", &self.object_src),
            ("media-src", &self.media_src),
            ("child-src", &self.child_src),
            ("form-action", &self.form_action),
            ("frame-ancestors", &self.frame_ancestors),
            ("worker-src", &self.worker_src),
            ("manifest-src", &self.manifest_src),
        ]
    }

    /// The policy for a response whose tags carry `nonce`.
    ///
    /// Returns `None` without a `default_src` list. Whether CSP is enabled is
    /// not checked here; see [`add_csp_header`].
    ///
    /// ```rust
    /// use js_asset::csp::CspConfig;
    ///
    /// let config = CspConfig {
    ///     enabled: true,
    ///     default_src: Some(vec!["'self'".to_string()]),
    ///     ..CspConfig::default()
    /// };
    /// assert_eq!(
    ///     config.header_value("abc").unwrap(),
    ///     "default-src 'self'; script-src 'nonce-abc'; style-src 'nonce-abc'"
    /// );
    /// ```
    pub fn header_value(&self, nonce: &str) -> Option<String> {
        let default_src = self.default_src.as_ref()?;

        let mut policy = format!(
            "default-src {}; script-src {}; style-src {}",
            default_src.join(" "),
            with_nonce_source(nonce, self.script_src.as_deref()),
            with_nonce_source(nonce, self.style_src.as_deref())
        );

        for (name, sources) in self.extra_directives() {
            if let Some(sources) = sources {
                policy.push_str(&format!("; {} {}", name, sources.join(" ")));
            }
        }

        Some(policy)
    }
}

fn with_nonce_source(nonce: &str, sources: Option<&[String]>) -> String {
    match sources {
        Some(sources) => format!("'nonce-{}' {}", nonce, sources.join(" ")),
        None => format!("'nonce-{nonce}'"),
    }
}

/// Header access for whatever response type the hosting framework uses.
pub trait ResponseHeaders {
    /// Header names compare case-insensitively.
    fn has_header(&self, name: &str) -> bool;

    fn set_header(&mut self, name: &str, value: String);
}

impl ResponseHeaders for HashMap<String, String> {
    fn has_header(&self, name: &str) -> bool {
        self.keys().any(|key| key.eq_ignore_ascii_case(name))
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.insert(name.to_string(), value);
    }
}

impl ResponseHeaders for Vec<(String, String)> {
    fn has_header(&self, name: &str) -> bool {
        self.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.push((name.to_string(), value));
    }
}

/// Add a `Content-Security-Policy` header built from `config`.
///
/// Nothing happens when CSP is disabled, when no `default_src` is configured,
/// or when the response already carries the header. Returns whether the header
/// was written.
pub fn add_csp_header<R>(response: &mut R, nonce: &str, config: &CspConfig) -> bool
where
    R: ResponseHeaders + ?Sized,
{
    if !config.enabled {
        return false;
    }
    if response.has_header(CSP_HEADER) {
        tracing::debug!("Response already has a {} header", CSP_HEADER);
        return false;
    }
    let Some(policy) = config.header_value(nonce) else {
        tracing::debug!("CSP enabled without default_src; no header written");
        return false;
    };

    response.set_header(CSP_HEADER, policy);
    true
}

/// Per-request CSP state: created when a request starts, consulted when its
/// response is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCsp {
    nonce: String,
}

impl RequestCsp {
    /// Generate a fresh nonce of the configured length.
    pub fn on_request_start(config: &CspConfig) -> Self {
        let nonce = generate_nonce(config.nonce_length);
        tracing::trace!("Generated CSP nonce for request");
        Self {
            nonce,
        }
    }

    /// Use a nonce chosen elsewhere, for example by an upstream proxy.
    pub fn with_nonce(nonce: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
        }
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Run the request handler with this nonce as the current nonce.
    pub async fn scope<F>(&self, handler: F) -> F::Output
    where
        F: Future,
    {
        with_request_nonce(self.nonce.clone(), handler).await
    }

    /// Post-process the response; see [`add_csp_header`].
    pub fn finish<R>(&self, response: &mut R, config: &CspConfig) -> bool
    where
        R: ResponseHeaders + ?Sized,
    {
        add_csp_header(response, &self.nonce, config)
    }
}

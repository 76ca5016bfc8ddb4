//! Error handling for js-asset
//!
//! The library reports failures through [`AssetError`], a small strongly-typed enum.
//! Application code (configuration loading and the CLI) wraps these in
//! [`anyhow::Error`] with context, and the binary turns whatever reaches the top
//! into an [`ErrorContext`] with a colored message and a suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use js_asset::core::{AssetError, user_friendly_error};
//!
//! let error = AssetError::UnsupportedOperand {
//!     left: "FormsMedia".to_string(),
//!     right: "FormsMedia".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for asset, import map and media operations.
///
/// # Error Categories
///
/// - [`StaticResolution`] - A relative path could not be turned into a URL
/// - [`UnsupportedOperand`] - Two collections cannot be combined
/// - [`SerializationError`] - JSON data could not be encoded
/// - [`ManifestParseError`] - A media manifest is malformed
/// - [`ConfigError`] - Settings are invalid
///
/// [`StaticResolution`]: AssetError::StaticResolution
/// [`UnsupportedOperand`]: AssetError::UnsupportedOperand
/// [`SerializationError`]: AssetError::SerializationError
/// [`ManifestParseError`]: AssetError::ManifestParseError
/// [`ConfigError`]: AssetError::ConfigError
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The static resolver failed for a relative path.
    #[error("Cannot resolve static path '{path}': {reason}")]
    StaticResolution {
        /// Path as declared by the asset
        path: String,
        /// Reason reported by the resolver
        reason: String,
    },

    /// `combine` is not defined for this pair of collection types.
    #[error("Unsupported operand types for combine: {left} and {right}")]
    UnsupportedOperand {
        /// Kind of the left-hand collection
        left: String,
        /// Kind of the right-hand collection
        right: String,
    },

    /// JSON payload could not be serialized.
    #[error("Failed to serialize JSON data: {reason}")]
    SerializationError {
        /// Serializer message
        reason: String,
    },

    #[error("Invalid media manifest syntax in {file}")]
    ManifestParseError {
        file: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, AssetError>;

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Error wrapper carrying a suggestion and extra details for terminal output.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AssetError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Additional explanation
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: AssetError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Library errors keep their variant; TOML and I/O failures are mapped onto
/// [`AssetError::ManifestParseError`] and [`AssetError::ConfigError`]. Anything
/// else is reported through its full `anyhow` chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(asset_error) = error.chain().find_map(|cause| cause.downcast_ref::<AssetError>()) {
        let ctx = create_error_context(asset_error.clone());
        // Context layers added on the way up say which file or command failed
        if error.chain().count() > 1 {
            return ctx.with_details(format!("{error:#}"));
        }
        return ctx;
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(AssetError::ManifestParseError {
            file: "unknown".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table headers")
        .with_details(format!("{error:#}"));
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(AssetError::ConfigError {
                message: format!("{error:#}"),
            })
            .with_suggestion("Check that the file exists and the path is correct");
        }
    }

    ErrorContext::new(AssetError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: AssetError) -> ErrorContext {
    match &error {
        AssetError::StaticResolution {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the file is listed in the static files manifest or use an absolute path")
            .with_details("Relative paths are resolved through the configured static URL or manifest"),
        AssetError::UnsupportedOperand {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Convert one side to Media first; plain declarations are merged by the hosting framework",
        ),
        AssetError::SerializationError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("JSON blocks need an object with string keys at the top level"),
        AssetError::ManifestParseError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Each widget needs a name; js entries are paths or tables with src or json")
                .with_details(details)
        }
        AssetError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the settings file passed with --settings or JS_ASSET_SETTINGS"),
    }
}

//! Core error types shared by every module.
//!
//! - [`AssetError`] - Typed failures of rendering, combining and configuration
//! - [`ErrorContext`] - Error plus suggestion, printed by the CLI
//! - [`user_friendly_error`] - Maps an [`anyhow::Error`] onto an [`ErrorContext`]

pub mod error;

pub use error::{AssetError, ErrorContext, Result, user_friendly_error};

//! Unit test suite for the js-asset library API
//!
//! Exercises the public API the way a hosting framework uses it: widgets build
//! assets, forms combine media, a request applies its nonce.
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! # Test Organization
//!
//! - **assets**: Tag rendering, attributes and rendered equality
//! - **importmap**: Import map merging and rendering
//! - **media**: Combine and render properties of media collections
//! - **csp**: Nonce injection and the request lifecycle

mod assets;
mod csp;
mod importmap;
mod media;

//! Test utilities shared by unit and integration tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature.
//!
//! ```rust,ignore
//! use js_asset::test_utils::{MediaManifestFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let temp = tempfile::tempdir()?;
//! let manifest = MediaManifestFixture::basic().write_to(temp.path())?;
//! ```

pub mod fixtures;

pub use fixtures::{MediaManifestFixture, SettingsFixture, json_object, write_static_manifest};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize tracing for tests.
///
/// With `level` set, logs at that level. Otherwise `RUST_LOG` is honored when
/// present and nothing is logged when it is not. Only the first call has an
/// effect.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

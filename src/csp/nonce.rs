//! Nonce generation and the request-scoped current nonce.
//!
//! The current nonce lives in tokio task-local storage. Code running inside
//! [`with_request_nonce`] (or [`sync_with_request_nonce`]) sees the nonce of
//! its own request only; concurrent requests never observe each other's value.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use rand::RngCore;
use std::future::Future;

tokio::task_local! {
    static REQUEST_NONCE: String;
}

/// Base64 encoding of `length` random bytes.
#[must_use]
pub fn generate_nonce(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::rng().fill_bytes(&mut bytes);
    BASE64_STANDARD.encode(&bytes)
}

/// Run `future` with `nonce` as the current request nonce.
pub async fn with_request_nonce<F>(nonce: impl Into<String>, future: F) -> F::Output
where
    F: Future,
{
    REQUEST_NONCE.scope(nonce.into(), future).await
}

/// Synchronous form of [`with_request_nonce`].
pub fn sync_with_request_nonce<R>(nonce: impl Into<String>, f: impl FnOnce() -> R) -> R {
    REQUEST_NONCE.sync_scope(nonce.into(), f)
}

/// The nonce of the enclosing request scope, if any.
pub fn current_nonce() -> Option<String> {
    REQUEST_NONCE.try_with(Clone::clone).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_nonce_length() {
        let nonce = generate_nonce(16);
        assert_eq!(nonce.len(), 24);
        let decoded = BASE64_STANDARD.decode(&nonce).unwrap();
        assert_eq!(decoded.len(), 16);

        assert_eq!(generate_nonce(32).len(), 44);
        assert_ne!(generate_nonce(16), generate_nonce(16));
    }

    #[test]
    fn test_no_nonce_outside_scope() {
        assert_eq!(current_nonce(), None);
    }

    #[test]
    fn test_sync_scope() {
        let seen = sync_with_request_nonce("abc", current_nonce);
        assert_eq!(seen.as_deref(), Some("abc"));
        assert_eq!(current_nonce(), None);
    }

    #[tokio::test]
    async fn test_async_scope() {
        let seen = with_request_nonce("abc", async { current_nonce() }).await;
        assert_eq!(seen.as_deref(), Some("abc"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_do_not_share_nonce() {
        let mut handles = Vec::new();
        for i in 0..16 {
            handles.push(tokio::spawn(with_request_nonce(format!("nonce-{i}"), async move {
                tokio::task::yield_now().await;
                (i, current_nonce())
            })));
        }
        for handle in handles {
            let (i, seen) = handle.await.unwrap();
            assert_eq!(seen, Some(format!("nonce-{i}")));
        }
    }
}

//! Fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single GET attempt (curl failure or non-200 status).
/// Kept as a typed enum so the retry loop can classify before the result is
/// flattened into a `DownloadResult`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-200 status.
    #[error("HTTP {0}")]
    Http(u32),
}

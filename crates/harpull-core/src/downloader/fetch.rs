//! Retrying GET client.
//!
//! One call = one definite success/failure signal: transient failures
//! (timeouts, connection hiccups, 429/500/502/503/504) are absorbed by the
//! retry loop; everything else surfaces after a single attempt. The client
//! itself does not log; diagnostics are the caller's concern.

use std::time::Duration;

use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// Per-attempt transport options.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Timeout for a single attempt (connect + transfer).
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Performs a GET for `url`, retrying per `policy`, and returns the body.
///
/// Only HTTP 200 counts as success; any other status is a `FetchError`
/// that the policy may retry (up to its attempt budget) or fail fast.
pub fn fetch_bytes(
    url: &str,
    options: &FetchOptions,
    policy: &RetryPolicy,
) -> Result<Vec<u8>, FetchError> {
    run_with_retry(policy, || fetch_once(url, options.timeout))
}

/// One GET attempt, body buffered in memory.
fn fetch_once(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.timeout(timeout)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code != 200 {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}

//! HTTP retry helper for transient WAQI errors.
//!
//! All WAQI requests go through [`send_json`] so that connection failures,
//! timeouts, rate limiting and server errors are retried with exponential
//! backoff.

use std::time::Duration;

use crate::WaqiError;

/// Maximum number of retry attempts for transient HTTP errors.
///
/// With exponential backoff (1s, 2s, 4s) the total wait before giving up is
/// 7 seconds, short enough to keep a dashboard request responsive.
const MAX_RETRIES: u32 = 3;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// Retries up to [`MAX_RETRIES`] times on connection errors, timeouts,
/// HTTP 429 and HTTP 5xx. Other 4xx statuses are permanent.
///
/// # Errors
///
/// Returns [`WaqiError`] if the request fails after all retries, the server
/// returns a non-retryable status code, or the body is not valid JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, WaqiError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = backoff(attempt);
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    continue;
                }
                return Err(WaqiError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if is_retryable_status(status) {
                    if attempt < MAX_RETRIES {
                        log::warn!("  HTTP {status}");
                        continue;
                    }
                    return Err(WaqiError::Status { status });
                }

                if status.is_client_error() {
                    return Err(WaqiError::Status { status });
                }

                return Ok(response.json().await?);
            }
        }
    }

    unreachable!("send_json retry loop exited without returning")
}

/// Delay before retry number `attempt` (1-based).
const fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << (attempt - 1))
}

/// 429 Too Many Requests and 5xx are worth retrying.
fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}

//! Resilient HTTP fetch with bounded retry and exponential backoff.
//!
//! Every outbound provider call (geocoding, routing) goes through
//! [`ResilientClient`] so transient upstream failures are absorbed here
//! instead of propagating to the resolvers. Backoff sleeps are ordinary
//! `tokio::time::sleep` awaits, so dropping the future cancels an in-flight
//! retry promptly.

use std::time::Duration;

use serde::de::DeserializeOwned;

/// Errors from the resilient fetch layer.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Failed to construct the underlying HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-retryable error status.
    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    /// All retry attempts were exhausted.
    #[error("upstream unavailable after {attempts} attempts: {url}")]
    UpstreamUnavailable { url: String, attempts: u32 },

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

/// Retry policy for outbound requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts after the first failure.
    pub max_retries: u32,

    /// Backoff before the first retry; doubles on each subsequent retry.
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

/// HTTP client wrapper that retries transient failures.
#[derive(Debug, Clone)]
pub struct ResilientClient {
    http: reqwest::Client,
    retry: RetryConfig,
}

impl ResilientClient {
    /// Create a new client with the given retry policy and request timeout.
    pub fn new(retry: RetryConfig, timeout_secs: u64) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quote-server/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { http, retry })
    }

    /// GET the URL with the given query parameters and deserialize the JSON body.
    ///
    /// Transport errors, 5xx and 429 responses are retried with exponential
    /// backoff. Other 4xx responses fail fast: retrying a bad request is
    /// pointless.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let total_attempts = self.retry.max_retries + 1;

        for attempt in 0..total_attempts {
            match self.http.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body = response.text().await?;
                        return serde_json::from_str(&body).map_err(|e| FetchError::Json {
                            message: e.to_string(),
                        });
                    }

                    if !is_retryable(status.as_u16()) {
                        return Err(FetchError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }

                    tracing::warn!(
                        url,
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        "retryable upstream status"
                    );
                }
                Err(e) => {
                    tracing::warn!(url, attempt = attempt + 1, error = %e, "transport error");
                }
            }

            if attempt + 1 < total_attempts {
                let backoff = self.retry.initial_backoff * 2u32.pow(attempt);
                tokio::time::sleep(backoff).await;
            }
        }

        Err(FetchError::UpstreamUnavailable {
            url: url.to_string(),
            attempts: total_attempts,
        })
    }
}

/// Whether a status code is worth retrying.
fn is_retryable(status: u16) -> bool {
    status >= 500 || status == 429
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};

    use super::*;

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable(500));
        assert!(is_retryable(502));
        assert!(is_retryable(429));
        assert!(!is_retryable(400));
        assert!(!is_retryable(404));
    }

    #[test]
    fn default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(500));
    }

    /// Spin up a local server whose handler fails `failures` times before
    /// succeeding, and return its address plus the shared call counter.
    async fn flaky_server(failures: u32) -> (SocketAddr, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));

        async fn handler(State(state): State<(Arc<AtomicU32>, u32)>) -> axum::response::Response {
            let (calls, failures) = state;
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                axum::response::IntoResponse::into_response(StatusCode::SERVICE_UNAVAILABLE)
            } else {
                axum::response::IntoResponse::into_response(Json(
                    serde_json::json!({"value": 42}),
                ))
            }
        }

        let app = Router::new()
            .route("/data", get(handler))
            .with_state((calls.clone(), failures));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (addr, calls)
    }

    fn fast_retry(max_retries: u32) -> ResilientClient {
        ResilientClient::new(
            RetryConfig {
                max_retries,
                initial_backoff: Duration::from_millis(1),
            },
            5,
        )
        .unwrap()
    }

    #[derive(Debug, serde::Deserialize)]
    struct DataResponse {
        value: u32,
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let (addr, calls) = flaky_server(2).await;
        let client = fast_retry(3);

        let url = format!("http://{addr}/data");
        let response: DataResponse = client.get_json(&url, &[]).await.unwrap();

        assert_eq!(response.value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_yield_upstream_unavailable() {
        let (addr, calls) = flaky_server(10).await;
        let client = fast_retry(2);

        let url = format!("http://{addr}/data");
        let result: Result<DataResponse, _> = client.get_json(&url, &[]).await;

        match result {
            Err(FetchError::UpstreamUnavailable { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_status_fails_fast() {
        async fn not_found() -> StatusCode {
            StatusCode::NOT_FOUND
        }

        let app = Router::new().route("/missing", get(not_found));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = fast_retry(3);
        let url = format!("http://{addr}/missing");
        let result: Result<DataResponse, _> = client.get_json(&url, &[]).await;

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}

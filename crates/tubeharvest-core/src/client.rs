//! HTTP client with request pacing for the YouTube Data API
//!
//! Every call goes through a rate limiter so a long pagination run does not
//! burst through the quota. Failures are not retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{HarvestError, Result};
use crate::url::DEFAULT_API_BASE;

const USER_AGENT: &str = concat!("tubeharvest/", env!("CARGO_PKG_VERSION"));

/// Error reasons that mean the credential itself was refused
const CREDENTIAL_REASONS: &[&str] = &["keyInvalid", "keyExpired", "ipRefererBlocked", "forbidden"];

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Data API root (default: the public googleapis endpoint)
    pub base_url: String,
    /// Maximum requests per second, `0` disables pacing (default: 10.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            requests_per_second: 10.0,
            timeout_secs: 30,
        }
    }
}

/// Spaces requests at least `min_interval` apart
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `requests_per_second`
    ///
    /// Non-positive or non-finite rates produce a limiter that never waits.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until the next request is allowed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: ApiErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorReason>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorReason {
    #[serde(default)]
    reason: String,
}

/// Paced HTTP client bound to one API credential
///
/// Construction is the authentication step: a client only exists for a
/// non-empty key. Keys the platform refuses surface as
/// `AuthenticationFailed` on the first request.
pub struct YoutubeClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    /// Create a client with default configuration
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// - `AuthenticationFailed` if the key is empty
    /// - `HttpError` if the underlying client cannot be built
    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(HarvestError::AuthenticationFailed(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(HarvestError::HttpError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a response body
    ///
    /// # Errors
    /// - `HttpError` - network failure or unreadable body
    /// - `AuthenticationFailed` - the API refused the credential
    /// - `ApiError` - any other non-success status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        if status.is_success() {
            return Ok(body);
        }

        Err(Self::classify_error(status, &body))
    }

    /// Transport error with the request URL removed, since it carries the key
    fn transport_error(error: reqwest::Error) -> HarvestError {
        HarvestError::HttpError(error.without_url())
    }

    /// Map a non-success response to an error variant
    fn classify_error(status: reqwest::StatusCode, body: &str) -> HarvestError {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_default();

        let message = if detail.message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            detail.message
        };

        let credential_refused = status == reqwest::StatusCode::UNAUTHORIZED
            || detail
                .errors
                .iter()
                .any(|e| CREDENTIAL_REASONS.contains(&e.reason.as_str()));

        if credential_refused {
            HarvestError::AuthenticationFailed(message)
        } else {
            HarvestError::ApiError {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_rate_limiter_interval() {
        assert_eq!(RateLimiter::new(10.0).min_interval(), Duration::from_millis(100));
        assert_eq!(RateLimiter::new(4.0).min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rate_limiter_disabled() {
        assert_eq!(RateLimiter::new(0.0).min_interval(), Duration::ZERO);
        assert_eq!(RateLimiter::new(-1.0).min_interval(), Duration::ZERO);
        assert_eq!(RateLimiter::new(f64::INFINITY).min_interval(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_rate_limiter_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(1.0);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(10.0);

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.requests_per_second, 10.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = YoutubeClient::new("key").unwrap();
        assert_eq!(client.api_key(), "key");
        assert_eq!(client.base_url(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = ClientConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..ClientConfig::default()
        };
        let client = YoutubeClient::with_config("key", config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_client_empty_key() {
        for key in ["", "   "] {
            match YoutubeClient::new(key) {
                Err(HarvestError::AuthenticationFailed(msg)) => assert!(msg.contains("empty")),
                _ => panic!("Expected AuthenticationFailed error"),
            }
        }
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{ "domain": "global", "reason": "keyInvalid" }]
            }
        }"#;
        match YoutubeClient::classify_error(StatusCode::BAD_REQUEST, body) {
            HarvestError::AuthenticationFailed(msg) => assert!(msg.contains("API key not valid")),
            other => panic!("Expected AuthenticationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unauthorized_without_body() {
        assert!(matches!(
            YoutubeClient::classify_error(StatusCode::UNAUTHORIZED, ""),
            HarvestError::AuthenticationFailed(_)
        ));
    }

    #[test]
    fn test_classify_quota_exceeded() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "reason": "quotaExceeded" }]
            }
        }"#;
        match YoutubeClient::classify_error(StatusCode::FORBIDDEN, body) {
            HarvestError::ApiError { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("quota"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_non_json_body() {
        match YoutubeClient::classify_error(StatusCode::BAD_GATEWAY, "<html>") {
            HarvestError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }
}

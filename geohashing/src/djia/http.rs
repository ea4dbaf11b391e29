//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::DjiaError;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("geohashing/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
///
/// Non-success statuses are returned rather than turned into errors, because
/// the DJIA endpoint explains failures in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8 (lossy) with surrounding whitespace removed.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response status and body, or `DjiaError::Network` if no response
    /// was received.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, DjiaError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new AsyncReqwestClient with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, DjiaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DjiaError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, DjiaError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(DjiaError::Network(format!("Request failed: {}", e)));
            }
        };

        let status = response.status().as_u16();

        // Read response body
        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(HttpResponse {
                    status,
                    body: bytes.to_vec(),
                })
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(DjiaError::Network(format!(
                    "Failed to read response: {}",
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Mock async HTTP client for testing.
    ///
    /// `Err` responses are reported as network failures. Requested URLs are
    /// recorded so tests can assert on the request path.
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<HttpResponse, String>,
        pub requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockAsyncHttpClient {
        /// Mock that answers every request with `status` and `body`.
        pub fn responding(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Mock whose requests never reach the server.
        pub fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// URLs requested so far.
        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().clone()
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, DjiaError> {
            self.requests.lock().push(url.to_string());
            self.response.clone().map_err(DjiaError::Network)
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockAsyncHttpClient::responding(200, "10458.68");

        let response = mock.get("http://example.com").await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.text(), "10458.68");
        assert_eq!(mock.requested_urls(), vec!["http://example.com"]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockAsyncHttpClient::failing("connection refused");

        let result = mock.get("http://example.com").await;
        assert!(matches!(result, Err(DjiaError::Network(_))));
    }

    #[test]
    fn test_response_text_trims_whitespace() {
        let response = HttpResponse {
            status: 200,
            body: b"  12479.63\n".to_vec(),
        };
        assert_eq!(response.text(), "12479.63");
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        let not_found = HttpResponse {
            status: 404,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(AsyncReqwestClient::new(Duration::from_secs(5)).is_ok());
    }
}

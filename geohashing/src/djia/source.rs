//! DJIA data sources.

use std::future::Future;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::DjiaError;
use super::http::AsyncHttpClient;

/// Default endpoint, addressed as `{base}/{year}/{month}/{day}`.
pub const DEFAULT_DJIA_URL: &str = "http://geo.crox.net/djia";

/// Something that can produce the DJIA opening value for a date.
///
/// The returned string is used verbatim in the hash input, so sources must
/// return it exactly as published (e.g. `"12620.90"`, not `"12620.9"`).
pub trait DjiaSource: Send + Sync {
    /// Fetch the DJIA opening value for `date`.
    fn fetch(&self, date: NaiveDate) -> impl Future<Output = Result<String, DjiaError>> + Send;
}

/// Error document returned by the endpoint on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// DJIA source backed by an HTTP endpoint.
pub struct HttpDjiaSource<C: AsyncHttpClient> {
    client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> HttpDjiaSource<C> {
    /// Creates a source querying `base_url`.
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds the request URL for a date.
    ///
    /// Month and day are not zero-padded.
    pub fn url_for(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            date.year(),
            date.month(),
            date.day()
        )
    }
}

impl<C: AsyncHttpClient> DjiaSource for HttpDjiaSource<C> {
    async fn fetch(&self, date: NaiveDate) -> Result<String, DjiaError> {
        let url = self.url_for(date);
        let response = self.client.get(&url).await?;
        let body = response.text();

        if !response.is_success() {
            let err = classify_failure(&body);
            warn!(date = %date, status = response.status, error = %err, "DJIA lookup failed");
            return Err(err);
        }

        if body.is_empty() {
            return Err(DjiaError::Network(format!("empty response from {}", url)));
        }
        if !is_decimal(&body) {
            return Err(DjiaError::Network(format!(
                "malformed response from {}: {:?}",
                url,
                truncate(&body, 64)
            )));
        }

        debug!(date = %date, djia = %body, "DJIA fetched");
        Ok(body)
    }
}

/// Classifies a failure body into an error kind.
///
/// The body is normally a JSON object with an `"error"` message; anything
/// else is classified on its raw text.
pub fn classify_failure(body: &str) -> DjiaError {
    let body = body.trim();
    if body.is_empty() {
        return DjiaError::Network("empty response".to_string());
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.to_string());

    if message.contains("date format error") {
        DjiaError::Unknown(format!("request rejected: {}", message))
    } else if message.contains("not available") {
        DjiaError::DataUnavailable(message)
    } else {
        DjiaError::Unknown(message)
    }
}

fn is_decimal(s: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in s.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

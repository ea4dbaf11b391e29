//! Error types for DJIA lookups.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while resolving a DJIA value.
///
/// None of these are retried by the library; callers decide whether to
/// retry, report, or fall back.
#[derive(Debug, Error)]
pub enum DjiaError {
    /// The data source has no value for the requested date (typically a
    /// future date, or today before the market opened).
    #[error("DJIA not available: {0}")]
    DataUnavailable(String),

    /// The request could not complete: no connectivity, timeout, or an empty
    /// or malformed response.
    #[error("Network error: {0}")]
    Network(String),

    /// Any failure the data source reported that could not be classified,
    /// including malformed request dates.
    #[error("Unknown DJIA error: {0}")]
    Unknown(String),

    /// The persistent cache could not be written.
    #[error("DJIA cache error: {0}")]
    Store(#[from] StoreError),
}

impl DjiaError {
    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DjiaError::Network(_) | DjiaError::DataUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = DjiaError::DataUnavailable("data not available yet".to_string());
        assert!(err.to_string().contains("not available"));
    }

    #[test]
    fn test_retryable() {
        assert!(DjiaError::Network("offline".into()).is_retryable());
        assert!(DjiaError::DataUnavailable("later".into()).is_retryable());
        assert!(!DjiaError::Unknown("bad date".into()).is_retryable());
    }

    #[test]
    fn test_from_store_error() {
        let store_err = StoreError::Serialization("boom".to_string());
        let err: DjiaError = store_err.into();
        assert!(matches!(err, DjiaError::Store(_)));
    }
}

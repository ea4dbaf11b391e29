//! Service error types.

use thiserror::Error;

use crate::config::ConfigFileError;
use crate::coord::CoordError;
use crate::djia::DjiaError;
use crate::store::StoreError;

/// Errors returned by [`GeohashService`](super::GeohashService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The DJIA value could not be resolved
    #[error(transparent)]
    Djia(#[from] DjiaError),

    /// The position is not a valid coordinate
    #[error("Invalid position: {0}")]
    Coord(#[from] CoordError),

    /// The configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// The persisted cache could not be opened
    #[error("Cache error: {0}")]
    Store(#[from] StoreError),

    /// The request was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
}

impl ServiceError {
    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Djia(e) => e.is_retryable(),
            _ => false,
        }
    }
}

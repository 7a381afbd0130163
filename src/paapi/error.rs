//! Errors raised by the PA-API client.

use crate::paapi::models::ErrorResponse;
use thiserror::Error;

/// A non-2xx answer from PA-API.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiException {
    /// HTTP status code
    pub status: u16,
    /// Short description of the failed call
    pub message: String,
    /// Raw response body
    pub body: String,
    /// Decoded `Errors` list, when the body carried one
    pub response: Option<ErrorResponse>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Api(#[from] ApiException),

    #[error("{0}")]
    Transport(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns the HTTP status for API-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api(exception) => Some(exception.status),
            _ => None,
        }
    }
}

//! Errors surfaced by the PA-API adapter.

use thiserror::Error;

/// Every adapter operation either returns its items or fails with one of
/// these. Configuration errors are raised before any network call; call
/// failures wrap whatever went wrong during the remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaapiError {
    #[error("Missing required configuration field '{0}'")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Call(String),
}

impl PaapiError {
    /// True for errors raised before the request left the process.
    pub fn is_config_error(&self) -> bool {
        matches!(self, PaapiError::MissingField(_) | PaapiError::InvalidConfig(_))
    }

    /// True for failures of the remote call itself.
    pub fn is_call_failure(&self) -> bool {
        matches!(self, PaapiError::Call(_))
    }
}

pub type Result<T, E = PaapiError> = std::result::Result<T, E>;

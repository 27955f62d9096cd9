use thiserror::Error;

/// Failure of a single HTTP exchange with the backend or the geocoder
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors surfaced to the login/register forms
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Rejected before any network call
    #[error("{0}")]
    Validation(String),
    /// The backend refused the credentials
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("credential storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Errors returned to a discrete user action (review post, alternative
/// request). Background refreshes never produce these; they keep last-good
/// state and log instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("write to storage failed")]
    Write,
}

//! The shared error family for normalized remote-call failures.

use crate::http::HttpError;
use thiserror::Error;

/// Every failed remote call surfaces as exactly one of these.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    /// The server answered with an error status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A payload could not be converted to its declared shape. Unrelated to
    /// any specific HTTP response.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The call never produced a usable response (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(reqwest::Error),
}

impl RemoteCallError {
    /// Tri-state hint for an external retry policy.
    ///
    /// Conversion failures are never retryable: the payload itself is
    /// malformed, not a transient condition. Network failures leave the
    /// decision to the policy.
    #[must_use]
    pub fn retryable(&self) -> Option<bool> {
        match self {
            RemoteCallError::Http(err) => err.retryable(),
            RemoteCallError::Conversion(_) => Some(false),
            RemoteCallError::Network(_) => None,
        }
    }
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteCallError::Conversion(ConversionError::new(err.to_string(), Some(err.into())))
        } else {
            RemoteCallError::Network(err)
        }
    }
}

/// Failure to convert a payload to its declared shape.
///
/// Message and cause pass through unchanged; see
/// [`RemoteCallError::retryable`] for why this is always non-retryable.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ConversionError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RemoteCallError>;

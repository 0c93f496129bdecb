//! Error-body decoding.
//!
//! The current client generation hands the normalizer raw error-body bytes;
//! the client configuration supplies the decoder that turns them into a
//! string-keyed mapping. The trait is the seam: services whose error payloads
//! are not plain JSON objects plug in their own implementation.

use crate::http::JsonObject;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Turns raw error-body bytes into a string-keyed mapping.
pub trait ErrorBodyDecoder: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded into an object. The
    /// normalizer recovers from this locally; implementations should not.
    fn decode(&self, bytes: &[u8]) -> Result<JsonObject, DecodeError>;
}

/// Default decoder: the body is a JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorBodyDecoder;

impl ErrorBodyDecoder for JsonErrorBodyDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<JsonObject, DecodeError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::NotAnObject),
        }
    }
}

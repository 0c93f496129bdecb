//! Normalization entry points for `reqwest`-backed calls.
//!
//! A failed call arrives here in exactly one of two ways: as an error-status
//! [`reqwest::Response`] (the current-generation shape) or as a
//! [`reqwest::Error`] that never produced a response. Both routes end in a
//! single [`RemoteCallError`]; no failure signal is dropped and none is
//! duplicated.

use crate::config::ClientConfig;
use crate::error::{RemoteCallError, Result};
use crate::http::{HttpError, TypedResponse};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Normalize an error-status response into a [`HttpError`].
///
/// Reads the full body and hands it, with the response metadata, to the
/// current-shape constructor. Body-read failures degrade to an empty body
/// rather than masking the HTTP failure with a secondary transport error.
pub async fn normalize_response(response: reqwest::Response, config: &ClientConfig) -> HttpError {
    let code = response.status().as_u16();
    let message = response
        .status()
        .canonical_reason()
        .map(std::string::ToString::to_string);
    let url = response.url().clone();
    let headers = response.headers().clone();

    let error_body = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(err) => {
            warn!(%url, code, error = %err, "failed to read error response body");
            Vec::new()
        }
    };

    HttpError::from_current(
        TypedResponse {
            code,
            message,
            url,
            headers,
            error_body,
        },
        config,
    )
}

/// Pass a successful response through; normalize anything else.
///
/// # Errors
///
/// Returns [`RemoteCallError::Http`] for any non-2xx response.
pub async fn check_status(
    response: reqwest::Response,
    config: &ClientConfig,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(RemoteCallError::Http(
            normalize_response(response, config).await,
        ))
    }
}

/// Read a successful response body as `T`, normalizing every failure mode.
///
/// # Errors
///
/// Returns [`RemoteCallError::Http`] for error statuses and
/// [`RemoteCallError::Conversion`] when a 2xx body does not deserialize into
/// `T`.
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    config: &ClientConfig,
) -> Result<T> {
    let response = check_status(response, config).await?;
    response.json::<T>().await.map_err(RemoteCallError::from)
}

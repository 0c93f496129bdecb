//! The normalized HTTP error value.
//!
//! Two generations of client plumbing report failed calls in different shapes:
//! the legacy path hands over an eagerly-buffered response record, the current
//! path hands over a typed response whose error body still needs a decoder.
//! [`HttpError`] folds both into one value exposing status, URL, reason,
//! headers, and a best-effort parsed body, so downstream handlers never branch
//! on which client generation produced the failure.

use crate::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};
use tracing::warn;
use url::Url;

/// A string-keyed JSON object, the shape every decoded error body takes.
pub type JsonObject = serde_json::Map<String, Value>;

/// Shared sentinel substituted when an error body cannot be decoded.
///
/// A single immutable value rather than a fresh allocation per failure, so
/// equality checks against it are cheap and exact.
static FALLBACK_BODY: LazyLock<Arc<JsonObject>> = LazyLock::new(|| {
    let mut body = JsonObject::new();
    body.insert(
        "message".to_string(),
        Value::String("failed to parse response".to_string()),
    );
    Arc::new(body)
});

/// The body mapping reported when decoding an error body fails.
#[must_use]
pub fn fallback_body() -> &'static JsonObject {
    &FALLBACK_BODY
}

/// Failed-call record from the legacy client generation.
///
/// Everything is eagerly populated by the time the failure is observed,
/// including the raw body bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Server reason phrase; may be empty or missing entirely.
    pub reason: Option<String>,
    /// Absolute URL of the request that failed.
    pub url: String,
    /// Header name/value pairs in wire order. Names may repeat.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Failed-call record from the current client generation.
///
/// The error body is raw bytes; materializing it requires the decoder carried
/// by the originating [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct TypedResponse {
    pub code: u16,
    /// Status message, if the client surfaced one.
    pub message: Option<String>,
    /// Final URL of the request, after any redirects.
    pub url: Url,
    pub headers: HeaderMap,
    pub error_body: Vec<u8>,
}

/// The underlying representation backing a [`HttpError`].
///
/// Exactly one generation's record backs a given error. The enum makes
/// both-set unrepresentable; [`ResponseSource::select`] enforces the same
/// invariant at the optional-pair boundary where callers still hold two
/// `Option`s.
#[derive(Debug, Clone)]
pub enum ResponseSource {
    Legacy(RawResponse),
    Current(TypedResponse),
}

impl ResponseSource {
    /// Pick the single backing representation out of an optional pair.
    ///
    /// # Panics
    ///
    /// Panics if both or neither representation is present. That is a caller
    /// bug, not a runtime condition to recover from.
    #[must_use]
    pub fn select(legacy: Option<RawResponse>, current: Option<TypedResponse>) -> Self {
        match (legacy, current) {
            (Some(raw), None) => ResponseSource::Legacy(raw),
            (None, Some(typed)) => ResponseSource::Current(typed),
            (Some(_), Some(_)) => {
                panic!("both legacy and current responses set for a single failed call")
            }
            (None, None) => panic!("no underlying response set for a failed call"),
        }
    }
}

/// Canonical error value for a failed remote HTTP call.
///
/// Constructed once when the failure is observed and immutable afterwards,
/// except for the lazily-built header view. Derive a re-messaged copy with
/// [`HttpError::with_message`]; the copy keeps every diagnostic field and
/// records the original as its cause.
#[derive(Debug, Clone)]
pub struct HttpError {
    status: u16,
    url: String,
    reason: Option<String>,
    retryable: Option<bool>,
    body: Option<Arc<JsonObject>>,
    source: ResponseSource,
    // Lazily built from `source` on first access. The computation is pure, so
    // a racing recompute before the cell settles would produce the same value.
    headers: OnceLock<HeaderMap>,
    message_override: Option<String>,
    cause: Option<Box<HttpError>>,
}

impl HttpError {
    /// Normalize a legacy failed-call record.
    ///
    /// `error_message` is the error text reported alongside the record by the
    /// legacy client; it stands in for the reason phrase when the record's own
    /// reason is empty. The body is a best-effort JSON decode: an undecodable
    /// legacy body yields no body mapping at all.
    pub fn from_legacy(response: RawResponse, error_message: impl Into<String>) -> Self {
        let reason = match response.reason.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => error_message.into(),
        };
        let body = serde_json::from_slice::<JsonObject>(&response.body)
            .ok()
            .map(Arc::new);

        Self {
            status: response.status,
            url: response.url.clone(),
            reason: Some(reason),
            retryable: None,
            body,
            source: ResponseSource::Legacy(response),
            headers: OnceLock::new(),
            message_override: None,
            cause: None,
        }
    }

    /// Normalize a current-generation failed-call record.
    ///
    /// The error body is materialized through the decoder configured on
    /// `config`. Decode failures never escape: the shared
    /// [`fallback_body`] sentinel is substituted instead, so a malformed error
    /// payload cannot mask the HTTP failure it accompanies. Status 404 and 400
    /// mark the error as not retryable; retrying a client error cannot fix it.
    pub fn from_current(response: TypedResponse, config: &ClientConfig) -> Self {
        let status = response.code;
        let url = response.url.to_string();
        let reason = response.message.clone().unwrap_or_default();
        let retryable = match status {
            400 | 404 => Some(false),
            _ => None,
        };

        let body = match config.error_decoder().decode(&response.error_body) {
            Ok(map) => Arc::new(map),
            Err(err) => {
                warn!(%url, status, error = %err, "failed to decode error response body");
                Arc::clone(&FALLBACK_BODY)
            }
        };

        Self {
            status,
            url,
            reason: Some(reason),
            retryable,
            body: Some(body),
            source: ResponseSource::Current(response),
            headers: OnceLock::new(),
            message_override: None,
            cause: None,
        }
    }

    /// HTTP status of the failed response.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Absolute URL of the request that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Server reason phrase, if one was supplied.
    ///
    /// Cleared on copies derived via [`HttpError::with_message`].
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.is_empty())
    }

    /// Retryability hint: `Some(false)` for 400/404, unset otherwise.
    #[must_use]
    pub fn retryable(&self) -> Option<bool> {
        self.retryable
    }

    /// Best-effort parsed response body.
    ///
    /// `None` when no decodable body existed on the legacy path; the
    /// [`fallback_body`] sentinel when the current path's decoder failed.
    #[must_use]
    pub fn response_body(&self) -> Option<&JsonObject> {
        self.body.as_deref()
    }

    /// The original error this one was derived from, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&HttpError> {
        self.cause.as_deref()
    }

    /// Response headers as a case-insensitive multimap.
    ///
    /// Built from the backing representation on first access and cached;
    /// repeated calls return the same view. Always non-empty-safe: an error
    /// with no headers yields an empty map, never a missing one.
    pub fn headers(&self) -> &HeaderMap {
        self.headers.get_or_init(|| build_headers(&self.source))
    }

    /// Human-readable message for logs and responses.
    ///
    /// Uses the `Status: .., URL: .., Message: ..` template whenever a reason
    /// is available, so operators can always correlate a failure with the call
    /// that produced it. Re-messaged copies return their override verbatim;
    /// reason-less errors defer to their cause's message.
    #[must_use]
    pub fn message(&self) -> String {
        if let Some(message) = &self.message_override {
            return message.clone();
        }
        match self.reason() {
            Some(reason) => format!(
                "Status: {}, URL: {}, Message: {}",
                self.status, self.url, reason
            ),
            None => match &self.cause {
                Some(cause) => cause.message(),
                None => format!("Status: {}, URL: {}", self.status, self.url),
            },
        }
    }

    /// Derive a copy carrying `message` verbatim.
    ///
    /// The copy shares status, URL, headers, and body with `self`, clears the
    /// reason (the caller supplied an explicit override), resets the
    /// retryability hint, and records `self` as its cause. This supports
    /// catching a failure and rethrowing it with a clarified message while
    /// keeping every diagnostic field and the causal chain intact.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            status: self.status,
            url: self.url.clone(),
            reason: None,
            retryable: None,
            body: self.body.clone(),
            source: self.source.clone(),
            headers: self.headers.clone(),
            message_override: Some(message.into()),
            cause: Some(Box::new(self.clone())),
        }
    }
}

fn build_headers(source: &ResponseSource) -> HeaderMap {
    match source {
        ResponseSource::Legacy(raw) => {
            let mut headers = HeaderMap::new();
            for (name, value) in &raw.headers {
                let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
                    warn!(header = %name, "skipping response header with invalid name");
                    continue;
                };
                let Ok(value) = HeaderValue::from_str(value) else {
                    warn!(header = %name, "skipping response header with invalid value");
                    continue;
                };
                headers.append(name, value);
            }
            headers
        }
        ResponseSource::Current(typed) => typed.headers.clone(),
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

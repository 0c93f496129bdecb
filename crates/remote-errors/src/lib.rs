//! Normalized error hierarchy for remote HTTP calls.
//!
//! Skybridge services talk to each other through two generations of client
//! plumbing that report failures in different shapes. This crate folds both
//! into one canonical [`HttpError`] (status, URL, reason, headers, parsed
//! body) plus sibling kinds for conversion and transport failures, so retry
//! policies and response handlers see a single error surface.
//!
//! It intentionally contains **no** retry scheduling and **no** request
//! dispatch; the retryable hint is set here, acted on elsewhere.

pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod normalize;

pub use config::ClientConfig;
pub use decode::{DecodeError, ErrorBodyDecoder, JsonErrorBodyDecoder};
pub use error::{ConversionError, RemoteCallError, Result};
pub use http::{HttpError, JsonObject, RawResponse, ResponseSource, TypedResponse, fallback_body};
pub use normalize::{check_status, normalize_response, read_json};

//! API documentation configuration for Skybridge services.
//!
//! A service opts into published documentation through [`ApiDocsConfig`] and
//! gets back a filtered `OpenAPI` document: configured title/description/
//! contact, and only the paths its patterns select.

pub mod config;
pub mod docs;
pub mod error;

pub use config::ApiDocsConfig;
pub use docs::{build_docs, load_spec};
pub use error::{ApiDocsError, Result};

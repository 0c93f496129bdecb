use serde::{Deserialize, Serialize};

/// Configuration for a service's published API documentation.
///
/// Mirrors the service config file: documentation stays off unless a service
/// opts in, and only paths matching one of the configured patterns are
/// published.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiDocsConfig {
    /// Whether the docs endpoint is registered at all.
    pub enabled: bool,

    /// Document title.
    pub title: String,

    /// Optional document description.
    pub description: Option<String>,

    /// Optional contact name.
    pub contact: Option<String>,

    /// Regex path selectors; a path is published when it matches any of them.
    pub patterns: Vec<String>,
}

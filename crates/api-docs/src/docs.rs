//! Builds the published `OpenAPI` document from a service's full spec.
//!
//! Declarative by design: path selection (the OR of the configured regex
//! patterns) and document info are the only transformations applied.

use crate::config::ApiDocsConfig;
use crate::error::{ApiDocsError, Result};
use openapiv3::{Contact, OpenAPI};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Load an `OpenAPI` spec from a YAML or JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as either format.
pub fn load_spec(path: &Path) -> Result<OpenAPI> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .or_else(|_| serde_yaml::from_str(&content))
        .map_err(|e: serde_yaml::Error| ApiDocsError::SpecParse {
            location: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Produce the published document: configured info, pattern-selected paths.
///
/// Paths are kept when they match **any** configured pattern. No patterns
/// means no published paths, so a service must name what it exposes.
///
/// # Errors
///
/// Returns an error if any configured pattern is not a valid regex.
pub fn build_docs(config: &ApiDocsConfig, mut spec: OpenAPI) -> Result<OpenAPI> {
    let selectors = compile_patterns(&config.patterns)?;

    let before = spec.paths.paths.len();
    spec.paths
        .paths
        .retain(|path, _| selectors.iter().any(|re| re.is_match(path)));
    debug!(
        published = spec.paths.paths.len(),
        total = before,
        "selected documented paths"
    );

    spec.info.title = config.title.clone();
    spec.info.description = config.description.clone();
    spec.info.contact = config.contact.as_ref().map(|name| Contact {
        name: Some(name.clone()),
        ..Contact::default()
    });

    Ok(spec)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p)
                .map_err(|e| ApiDocsError::Config(format!("Invalid path pattern '{p}': {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn sample_spec() -> OpenAPI {
        serde_yaml::from_str(
            r"
            openapi: 3.0.0
            info:
              title: full spec
              version: 1.0.0
            paths:
              /apps/{id}:
                get:
                  responses:
                    '200':
                      description: ok
              /internal/metrics:
                get:
                  responses:
                    '200':
                      description: ok
            ",
        )
        .expect("valid spec")
    }

    fn config(patterns: &[&str]) -> ApiDocsConfig {
        ApiDocsConfig {
            enabled: true,
            title: "Gate API".to_string(),
            description: Some("public surface".to_string()),
            contact: Some("platform team".to_string()),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[test]
    fn keeps_only_paths_matching_any_pattern() {
        let docs = build_docs(&config(&["/apps/.*"]), sample_spec()).expect("build");
        assert!(docs.paths.paths.contains_key("/apps/{id}"));
        assert!(!docs.paths.paths.contains_key("/internal/metrics"));
    }

    #[test]
    fn no_patterns_publishes_no_paths() {
        let docs = build_docs(&config(&[]), sample_spec()).expect("build");
        assert!(docs.paths.paths.is_empty());
    }

    #[test]
    fn installs_configured_info() {
        let docs = build_docs(&config(&[".*"]), sample_spec()).expect("build");
        assert_eq!(docs.info.title, "Gate API");
        assert_eq!(docs.info.description.as_deref(), Some("public surface"));
        assert_eq!(
            docs.info.contact.as_ref().and_then(|c| c.name.as_deref()),
            Some("platform team")
        );
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = build_docs(&config(&["["]), sample_spec()).expect_err("bad regex");
        assert!(matches!(err, ApiDocsError::Config(_)));
    }

    #[test]
    fn loads_yaml_spec_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            "openapi: 3.0.0\ninfo:\n  title: t\n  version: 1.0.0\npaths: {{}}\n"
        )
        .expect("write");

        let spec = load_spec(file.path()).expect("load");
        assert_eq!(spec.info.title, "t");
    }

    #[test]
    fn loads_json_spec_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{"openapi":"3.0.0","info":{{"title":"t","version":"1.0.0"}},"paths":{{}}}}"#
        )
        .expect("write");

        let spec = load_spec(file.path()).expect("load");
        assert_eq!(spec.info.title, "t");
    }
}

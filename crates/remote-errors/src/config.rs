//! Client configuration consumed by the normalizer.

use crate::decode::{ErrorBodyDecoder, JsonErrorBodyDecoder};
use std::fmt;
use std::sync::Arc;

/// Per-client configuration the current-generation path needs to materialize
/// an error body. The default wires the JSON decoder, which covers every
/// Skybridge service that reports errors as JSON objects.
#[derive(Clone)]
pub struct ClientConfig {
    error_decoder: Arc<dyn ErrorBodyDecoder>,
}

impl ClientConfig {
    #[must_use]
    pub fn new(error_decoder: Arc<dyn ErrorBodyDecoder>) -> Self {
        Self { error_decoder }
    }

    #[must_use]
    pub fn error_decoder(&self) -> &dyn ErrorBodyDecoder {
        self.error_decoder.as_ref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Arc::new(JsonErrorBodyDecoder))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig").finish_non_exhaustive()
    }
}

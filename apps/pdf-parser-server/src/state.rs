//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::extract::{LopdfExtractor, PdfExtractor};

/// Shared application state
///
/// Built once at startup and never mutated; every request sees the same
/// configuration and extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extractor: Arc<dyn PdfExtractor>,
}

impl AppState {
    /// Create application state with the default lopdf/pdf-extract backend
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(LopdfExtractor::new()))
    }

    /// Create application state with a specific extractor
    pub fn with_extractor(config: Config, extractor: Arc<dyn PdfExtractor>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, extractor }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the PDF extractor
    pub fn extractor(&self) -> &dyn PdfExtractor {
        self.inner.extractor.as_ref()
    }
}

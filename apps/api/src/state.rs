use std::sync::Arc;

use crate::analysis::report::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Vocabulary, company profiles and tokenizer data. Read-only after startup.
    pub analyzer: Arc<Analyzer>,
}

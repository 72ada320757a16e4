use std::sync::Arc;

use crate::config::Config;
use crate::ingest::parser::ResumeParser;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable parse backend. HttpResumeParser when PARSER_URL is set, fixtures otherwise.
    pub parser: Arc<dyn ResumeParser>,
    pub config: Config,
}

use std::path::PathBuf;
use std::sync::Arc;

use crate::assistant::agent::Assistant;
use crate::config::Config;
use crate::hunt::orchestrator::HuntOrchestrator;
use crate::llm_client::LanguageModel;
use crate::report::pdf::PdfRenderer;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Shared with the scheduler; its run lock serializes manual and scheduled hunts.
    pub hunt: Arc<HuntOrchestrator>,
    pub assistant: Arc<Assistant>,
    pub llm: Arc<dyn LanguageModel>,
    pub store: DocumentStore,
    pub renderer: PdfRenderer,
    pub config: Config,
}

impl AppState {
    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.reports_dir)
    }
}

use std::sync::Arc;

use brevity_provider::TextSummarizer;

/// Shared per-process state: the summarizer holds the one pooled HTTP client.
pub struct AppState {
    pub summarizer: Arc<dyn TextSummarizer>,
}

impl AppState {
    pub fn new(summarizer: Arc<dyn TextSummarizer>) -> Self {
        Self { summarizer }
    }
}

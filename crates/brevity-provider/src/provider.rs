use async_trait::async_trait;
use brevity_core::SummaryRequest;

use crate::error::ProviderError;

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

/// A service that turns article text into a short summary.
///
/// The HTTP boundary holds an `Arc<dyn TextSummarizer>`; the production
/// implementation is [`crate::BytezSummarizer`].
#[async_trait]
pub trait TextSummarizer: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String>;
}

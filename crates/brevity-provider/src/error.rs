use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between accepting a request and returning a
/// summary. Failures stay typed until the HTTP boundary flattens them.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] brevity_core::PolicyError),

    #[error("provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error(
        "provider rejected the request (422) and the fallback retry failed: \
         first attempt: {first}; retry: {second}"
    )]
    RejectedTwice { first: String, second: String },

    #[error("provider reported an error: {0}")]
    Reported(String),

    #[error("provider response did not match any known shape")]
    UnrecognizedShape,

    #[error("provider request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider request failed: {0}")]
    Http(reqwest::Error),

    #[error("provider response was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

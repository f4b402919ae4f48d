use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use brevity_core::PolicyError;
use brevity_provider::ProviderError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("text is required")]
    MissingText,

    #[error("{0}")]
    Policy(#[from] PolicyError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn provider_status(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ProviderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ProviderError::Upstream { .. }
        | ProviderError::RejectedTwice { .. }
        | ProviderError::Reported(_)
        | ProviderError::UnrecognizedShape
        | ProviderError::Http(_)
        | ProviderError::Json(_) => StatusCode::BAD_GATEWAY,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingText => StatusCode::BAD_REQUEST,
            AppError::Policy(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(err) => provider_status(err),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Plain text so the form page can render the body verbatim.
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

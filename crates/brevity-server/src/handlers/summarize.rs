use actix_web::{web, HttpResponse};
use log::info;

use brevity_core::{length, SummaryRequest, SummaryResult};

use crate::error::{AppError, Result};
use crate::logging::Timer;
use crate::state::AppState;

pub async fn handler(
    state: web::Data<AppState>,
    req: web::Json<SummaryRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.text.trim().is_empty() {
        return Err(AppError::MissingText);
    }
    // Invalid length input must never produce a provider call.
    length::resolve(req.length, req.max_length)?;

    let timer = Timer::new("provider summarize");
    let summary = state.summarizer.summarize(&req).await?;
    timer.debug();

    info!(
        "summarized {} chars ({}) into {} chars",
        req.text.len(),
        req.length,
        summary.len()
    );
    Ok(HttpResponse::Ok().json(SummaryResult { summary }))
}

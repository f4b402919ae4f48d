use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use brevity_provider::{BytezConfig, BytezSummarizer, TextSummarizer};

use crate::handlers;
use crate::state::AppState;

/// Route table shared by the binary and the integration tests.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index::handler)).service(
        web::scope("/api/v1")
            .route("/summaries", web::post().to(handlers::summarize::handler))
            .route("/health", web::get().to(handlers::health::handler)),
    );
}

pub async fn run_server_with_config(
    port: u16,
    model_url: String,
    api_key: String,
    timeout: Duration,
) -> io::Result<()> {
    log::info!("Initializing summarizer with model URL: {}", model_url);
    let config = BytezConfig::new(model_url, api_key).with_timeout(timeout);
    let summarizer: Arc<dyn TextSummarizer> = Arc::new(BytezSummarizer::new(config));
    let state = web::Data::new(AppState::new(summarizer));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}

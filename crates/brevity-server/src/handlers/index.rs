use actix_web::{HttpResponse, Responder};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serves the embedded form page; there is no frontend build step.
pub async fn handler() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

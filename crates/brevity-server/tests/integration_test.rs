use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::json;

use brevity_core::SummaryRequest;
use brevity_provider::{BytezConfig, BytezSummarizer, ProviderError, TextSummarizer};
use brevity_server::server::app_config;
use brevity_server::state::AppState;

/// Scripted summarizer for endpoint tests.
struct MockSummarizer {
    calls: Arc<AtomicUsize>,
    reply: fn(&SummaryRequest) -> Result<String, ProviderError>,
}

impl MockSummarizer {
    fn new(
        reply: fn(&SummaryRequest) -> Result<String, ProviderError>,
    ) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                calls: calls.clone(),
                reply,
            }),
            calls,
        )
    }
}

#[async_trait]
impl TextSummarizer for MockSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(request)
    }
}

async fn init_app(
    summarizer: Arc<dyn TextSummarizer>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = web::Data::new(AppState::new(summarizer));
    test::init_service(App::new().app_data(state).configure(app_config)).await
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (mock, _) = MockSummarizer::new(|_| Ok("unused".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_index_serves_the_form_page() {
    let (mock, _) = MockSummarizer::new(|_| Ok("unused".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let page = std::str::from_utf8(&body).unwrap();
    assert!(page.contains("<title>Brevity</title>"));
    assert!(page.contains("/api/v1/summaries"));
}

#[actix_web::test]
async fn test_summarize_returns_summary_json() {
    let (mock, calls) = MockSummarizer::new(|_| Ok("A concise summary.".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article about things.", "length": "short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"summary": "A concise summary."}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_blank_text_is_rejected_without_a_provider_call() {
    let (mock, calls) = MockSummarizer::new(|_| Ok("should not happen".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    assert_eq!(body, "text is required");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_custom_without_max_length_is_rejected_server_side() {
    let (mock, calls) = MockSummarizer::new(|_| Ok("should not happen".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article.", "length": "custom"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("maxLength"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_custom_zero_max_length_is_rejected() {
    let (mock, calls) = MockSummarizer::new(|_| Ok("should not happen".to_string()));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article.", "length": "custom", "maxLength": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_unknown_length_selector_is_treated_as_medium() {
    let (mock, _) = MockSummarizer::new(|req| Ok(format!("len={}", req.length)));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article.", "length": "gigantic"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["summary"], "len=medium");
}

#[actix_web::test]
async fn test_provider_failure_maps_to_bad_gateway() {
    let (mock, _) = MockSummarizer::new(|_| {
        Err(ProviderError::Upstream {
            status: 503,
            body: "model loading".to_string(),
        })
    });
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("model loading"));
}

#[actix_web::test]
async fn test_provider_timeout_maps_to_gateway_timeout() {
    let (mock, _) = MockSummarizer::new(|_| Err(ProviderError::Timeout(Duration::from_secs(60))));
    let app = init_app(mock).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/summaries")
        .set_json(json!({"text": "A long article."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
}

mod end_to_end {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn init_app_against(
        server: &MockServer,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let config = BytezConfig::new(server.uri(), "sk-e2e");
        init_app(Arc::new(BytezSummarizer::new(config))).await
    }

    #[actix_web::test]
    async fn test_full_stack_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"max_length": 300, "min_length": 150})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"summary_text": "End to end summary."}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = init_app_against(&server).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/summaries")
            .set_json(json!({"text": "A very long article.", "length": "long"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"summary": "End to end summary."}));
    }

    #[actix_web::test]
    async fn test_blank_text_never_reaches_the_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let app = init_app_against(&server).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/summaries")
            .set_json(json!({"text": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_provider_error_body_reaches_the_client_as_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "rate limited"})))
            .mount(&server)
            .await;

        let app = init_app_against(&server).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/summaries")
            .set_json(json!({"text": "A long article."}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("rate limited"));
    }
}

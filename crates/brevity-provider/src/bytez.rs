use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use brevity_core::{length, sanitize, SummaryRequest};

use crate::error::ProviderError;
use crate::provider::{Result, TextSummarizer};

/// max_length sent on the reduced fallback payload after a 422.
const FALLBACK_MAX_LENGTH: u32 = 80;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the hosted model, fixed at construction.
#[derive(Debug, Clone)]
pub struct BytezConfig {
    /// Full endpoint URL of the model; requests POST here with no path suffix.
    pub model_url: String,
    /// Sent verbatim in the Authorization header when non-blank.
    pub api_key: String,
    /// Applies to each outbound round-trip, including the fallback retry.
    pub timeout: Duration,
}

impl BytezConfig {
    pub fn new(model_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_url: model_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wire shape the provider expects.
#[derive(Debug, Serialize)]
struct ProviderPayload<'a> {
    text: &'a str,
    max_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<u32>,
}

pub struct BytezSummarizer {
    client: Client,
    config: BytezConfig,
}

impl BytezSummarizer {
    pub fn new(config: BytezConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }

    async fn post_payload(&self, payload: &ProviderPayload<'_>) -> Result<reqwest::Response> {
        let mut request = self.client.post(&self.config.model_url).json(payload);
        if !self.config.api_key.trim().is_empty() {
            request = request.header("Authorization", self.config.api_key.as_str());
        }
        request.send().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.timeout)
        } else {
            ProviderError::Http(err)
        }
    }

    /// Second and final attempt after a 422: a reduced payload with no
    /// min_length, never retried again.
    async fn retry_reduced(&self, text: &str, first_body: String) -> Result<String> {
        let payload = ProviderPayload {
            text,
            max_length: FALLBACK_MAX_LENGTH,
            min_length: None,
        };
        let response = self.post_payload(&payload).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::RejectedTwice {
                first: first_body,
                second: body,
            });
        }
        normalize(&body)
    }
}

#[async_trait]
impl TextSummarizer for BytezSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String> {
        let bounds = length::resolve(request.length, request.max_length)?;
        let text = sanitize::clean_text(&request.text);

        let payload = ProviderPayload {
            text: &text,
            max_length: bounds.max_tokens,
            min_length: Some(bounds.min_tokens),
        };
        debug!(
            "requesting summary: max_length={} min_length={}",
            bounds.max_tokens, bounds.min_tokens
        );

        let response = self.post_payload(&payload).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            warn!("provider returned 422, retrying once with reduced payload");
            return self.retry_reduced(&text, body).await;
        }
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        normalize(&body)
    }
}

/// The response shapes the provider has been observed to return.
#[derive(Debug, PartialEq)]
enum ProviderShape {
    ArraySummary(String),
    ObjectOutput(String),
    ObjectError(String),
    Unrecognized,
}

fn classify(root: &Value) -> ProviderShape {
    if let Some(items) = root.as_array() {
        if let Some(first) = items.first() {
            for field in ["summary_text", "generated_text"] {
                if let Some(text) = first.get(field).and_then(Value::as_str) {
                    return ProviderShape::ArraySummary(strip_quotes(text));
                }
            }
        }
    } else if let Some(object) = root.as_object() {
        if let Some(output) = object.get("output").and_then(Value::as_str) {
            let output = output.trim();
            if !output.is_empty() {
                return ProviderShape::ObjectOutput(output.to_string());
            }
        }
        if let Some(message) = object.get("error").filter(|v| !v.is_null()) {
            let message = match message.as_str() {
                Some(s) => s.to_string(),
                None => message.to_string(),
            };
            if !message.is_empty() {
                return ProviderShape::ObjectError(message);
            }
        }
    }
    ProviderShape::Unrecognized
}

fn normalize(body: &str) -> Result<String> {
    let root: Value = serde_json::from_str(body)?;
    match classify(&root) {
        ProviderShape::ArraySummary(text) | ProviderShape::ObjectOutput(text) => Ok(text),
        ProviderShape::ObjectError(message) => Err(ProviderError::Reported(message)),
        ProviderShape::Unrecognized => Err(ProviderError::UnrecognizedShape),
    }
}

/// Some model deployments wrap the generated text in literal quote
/// characters and escape interior quotes.
fn strip_quotes(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.replace("\\\"", "\"")
}

// src/advisor/client.rs

use crate::config::AdvisorSettings;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Reply shown when the service answered 2xx but with a shape we cannot read.
/// A degraded advisory answer beats a hard failure for this non-critical path.
pub const PLACEHOLDER_REPLY: &str =
    "The advisory service returned an unexpected response. Please try again.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("completion service credential is not configured; set OPENAI_API_KEY")]
    MissingCredential,
    #[error("completion request timed out after {0}s")]
    Timeout(u64),
    #[error("completion service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("completion request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// Thin client for the external chat-completion service. The service is a
/// black box: one request in, one completion text out; it may fail or time
/// out, and both surface as distinct errors.
#[derive(Clone)]
pub struct CompletionClient {
    http: Client,
    settings: AdvisorSettings,
}

impl CompletionClient {
    pub fn new(settings: AdvisorSettings) -> Result<Self> {
        Url::parse(&settings.api_base)
            .with_context(|| format!("invalid completion api_base `{}`", settings.api_base))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("building completion HTTP client")?;
        Ok(CompletionClient { http, settings })
    }

    pub fn has_credential(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }

    /// Submit {system instruction, user message} and return the completion
    /// text. A 2xx response with an unexpected JSON shape degrades to
    /// [`PLACEHOLDER_REPLY`] rather than erroring.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, AdvisorError> {
        let Some(api_key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(AdvisorError::MissingCredential);
        };

        let payload = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let url = format!("{}/chat/completions", self.settings.api_base.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisorError::Timeout(self.settings.timeout_secs)
                } else {
                    AdvisorError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AdvisorError::Timeout(self.settings.timeout_secs)
            } else {
                AdvisorError::Transport(e)
            }
        })?;

        if !status.is_success() {
            return Err(AdvisorError::Upstream { status: status.as_u16(), body });
        }

        Ok(extract_reply(&body))
    }
}

/// Pull `choices[0].message.content` out of a completion response, degrading
/// to the placeholder on any shape mismatch.
fn extract_reply(body: &str) -> String {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "completion response was not JSON, using placeholder");
            return PLACEHOLDER_REPLY.to_string();
        }
    };

    match parsed
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
    {
        Some(reply) => reply.to_string(),
        None => {
            warn!("completion response missing choices[0].message.content, using placeholder");
            PLACEHOLDER_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};

    fn settings(api_base: String, api_key: Option<&str>) -> AdvisorSettings {
        AdvisorSettings {
            api_key: api_key.map(str::to_string),
            api_base,
            timeout_secs: 5,
            ..AdvisorSettings::default()
        }
    }

    async fn serve_canned(status: u16, body: &'static str) -> String {
        let app = Router::new().route(
            "/chat/completions",
            post(move || async move {
                (axum::http::StatusCode::from_u16(status).unwrap(), body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let client = CompletionClient::new(settings("http://127.0.0.1:1".into(), None)).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingCredential));

        let client =
            CompletionClient::new(settings("http://127.0.0.1:1".into(), Some(""))).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingCredential));
    }

    #[tokio::test]
    async fn upstream_failure_carries_status_and_body() {
        let base = serve_canned(500, "upstream exploded").await;
        let client = CompletionClient::new(settings(base, Some("key"))).unwrap();

        let err = client.complete("sys", "user").await.unwrap_err();
        match err {
            AdvisorError::Upstream { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn well_formed_reply_is_extracted() {
        let base = serve_canned(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"invest in beekeeping"}}]}"#,
        )
        .await;
        let client = CompletionClient::new(settings(base, Some("key"))).unwrap();

        let reply = client.complete("sys", "user").await.unwrap();
        assert_eq!(reply, "invest in beekeeping");
    }

    #[tokio::test]
    async fn malformed_success_degrades_to_placeholder() {
        let base = serve_canned(200, r#"{"unexpected":"shape"}"#).await;
        let client = CompletionClient::new(settings(base, Some("key"))).unwrap();

        let reply = client.complete("sys", "user").await.unwrap();
        assert_eq!(reply, PLACEHOLDER_REPLY);
    }

    #[test]
    fn reply_extraction_shapes() {
        assert_eq!(
            extract_reply(r#"{"choices":[{"message":{"content":"ok"}}]}"#),
            "ok"
        );
        assert_eq!(extract_reply("not json at all"), PLACEHOLDER_REPLY);
        assert_eq!(extract_reply(r#"{"choices":[]}"#), PLACEHOLDER_REPLY);
        assert_eq!(
            extract_reply(r#"{"choices":[{"message":{"content":42}}]}"#),
            PLACEHOLDER_REPLY
        );
    }

    #[test]
    fn bad_api_base_is_rejected_at_construction() {
        assert!(CompletionClient::new(settings("not a url".into(), Some("k"))).is_err());
    }
}

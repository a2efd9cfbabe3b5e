//! Chat-completions client for the summarization backend.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SummarizeError;
use crate::git::CommitRecord;
use crate::summarize::prompt;

/// Fixed summarization backend endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.blackbox.ai/chat/completions";

/// Bound on the single summarization call; expiry aborts the request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sampling temperature for summary generation.
const TEMPERATURE: f32 = 0.3;

/// Upper bound on generated tokens.
const MAX_TOKENS: u32 = 300;

/// Chat request message.
#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

/// Chat request body.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Chat response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: String,
}

/// Chat response body.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Client for the summarization backend.
pub struct SummaryClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl SummaryClient {
    /// Create a client against the fixed backend endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model,
        }
    }

    /// Override the backend endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Request a natural-language summary of `commit`.
    ///
    /// One POST, no retries. Returns the trimmed content of the first choice.
    pub async fn generate(&self, commit: &CommitRecord) -> Result<String, SummarizeError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt::user_prompt(commit),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        info!(
            endpoint = %self.endpoint,
            model = %self.model,
            commit = %commit.short_hash,
            "Requesting commit summary"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_send_error)?;

        if !status.is_success() {
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let summary = parse_summary(&body)?;
        debug!(summary_len = summary.len(), "Extracted summary from response");
        Ok(summary)
    }
}

/// Split reqwest failures into the timeout and transport categories.
fn classify_send_error(err: reqwest::Error) -> SummarizeError {
    if err.is_timeout() {
        SummarizeError::Timeout(REQUEST_TIMEOUT_SECS)
    } else {
        SummarizeError::Transport(err.to_string())
    }
}

/// Pull the trimmed `choices[0].message.content` out of a response body.
fn parse_summary(body: &str) -> Result<String, SummarizeError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|err| SummarizeError::Shape {
            reason: err.to_string(),
            body: body.to_string(),
        })?;

    let content = parsed
        .choices
        .first()
        .map(|choice| choice.message.content.as_str())
        .ok_or_else(|| SummarizeError::Shape {
            reason: "no choices in response".to_string(),
            body: body.to_string(),
        })?;

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_summary_trims_content() {
        let body = r#"{"choices":[{"message":{"content":" Hello "}}]}"#;
        assert_eq!(parse_summary(body).unwrap(), "Hello");
    }

    #[test]
    fn parse_summary_ignores_extra_fields() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"- did a thing"},"finish_reason":"stop"}],"usage":{"total_tokens":12}}"#;
        assert_eq!(parse_summary(body).unwrap(), "- did a thing");
    }

    #[test]
    fn missing_choices_is_a_shape_error() {
        let err = parse_summary(r#"{"ok":true}"#).unwrap_err();
        assert!(matches!(err, SummarizeError::Shape { .. }));
    }

    #[test]
    fn empty_choices_is_a_shape_error() {
        let err = parse_summary(r#"{"choices":[]}"#).unwrap_err();
        match err {
            SummarizeError::Shape { reason, .. } => {
                assert_eq!(reason, "no choices in response");
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_shape_error() {
        let err = parse_summary("not json at all").unwrap_err();
        match err {
            SummarizeError::Shape { body, .. } => assert_eq!(body, "not json at all"),
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn missing_content_is_a_shape_error() {
        let err = parse_summary(r#"{"choices":[{"message":{}}]}"#).unwrap_err();
        assert!(matches!(err, SummarizeError::Shape { .. }));
    }
}

//! REST client for Gemini `generateContent` with Google Search grounding.
//!
//! Every request enables the `google_search` tool so answers reflect live
//! listings rather than the model's training cutoff.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{SearchBackend, SearchError};
use crate::config::SearchConfig;

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: SearchConfig,
}

// ---------------------------------------------------------------------------
// Response shapes (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client with the configured request timeout.
    pub fn new(config: SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url, self.config.model
        )
    }

    /// Ensure the response has a success status code, capturing the body
    /// text otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SearchBackend for GeminiClient {
    async fn search(&self, prompt: &str) -> Result<String, SearchError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "tools": [{ "google_search": {} }],
        });

        tracing::debug!(model = %self.config.model, "Sending search prompt");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: GenerateContentResponse = response.json().await?;
        answer_text(parsed)
    }
}

/// Concatenate the text parts of the first candidate.
fn answer_text(response: GenerateContentResponse) -> Result<String, SearchError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let detail = response
            .prompt_feedback
            .map(|f| f.to_string())
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(SearchError::EmptyResponse(detail));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty candidate".to_string());
        return Err(SearchError::EmptyResponse(reason));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn decode(raw: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn joins_text_parts() {
        let response = decode(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"title\":" }, { "text": "\"X\"}]" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(answer_text(response).unwrap(), "[{\"title\":\"X\"}]");
    }

    #[test]
    fn no_candidates_reports_prompt_feedback() {
        let response = decode(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        let err = answer_text(response).unwrap_err();
        assert_matches!(err, SearchError::EmptyResponse(ref detail) if detail.contains("SAFETY"));
    }

    #[test]
    fn blank_candidate_reports_finish_reason() {
        let response = decode(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
        }));
        assert_matches!(
            answer_text(response),
            Err(SearchError::EmptyResponse(ref reason)) if reason == "MAX_TOKENS"
        );
    }

    #[test]
    fn api_error_display() {
        let err = SearchError::ApiError {
            status: 429,
            body: "quota".into(),
        };
        assert_eq!(err.to_string(), "Search API error (429): quota");
    }
}

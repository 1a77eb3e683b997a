use async_trait::async_trait;

/// Errors from a search round trip.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code.
    #[error("Search API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API answered but produced no text (e.g. a blocked prompt).
    #[error("Search API returned no text: {0}")]
    EmptyResponse(String),
}

/// A model that answers a prompt with help from live web search.
///
/// The pipeline only needs the raw answer text; turning it into records is
/// the parser's job.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Send one prompt and return the model's answer text.
    async fn search(&self, prompt: &str) -> Result<String, SearchError>;
}

use std::time::Duration;

/// Default Gemini model with Google Search grounding support.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Generative Language API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for one search round trip, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the search-grounded model.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

impl SearchConfig {
    /// Load search configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                            |
    /// |-----------------------|----------|----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | **yes**  | --                                                 |
    /// | `GEMINI_MODEL`        | no       | `gemini-2.5-flash`                                 |
    /// | `GEMINI_API_URL`      | no       | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `SEARCH_TIMEOUT_SECS` | no       | `120`                                              |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is not set or is empty, or if
    /// `SEARCH_TIMEOUT_SECS` is not a valid number.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "GEMINI_API_KEY must not be empty");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("SEARCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("SEARCH_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

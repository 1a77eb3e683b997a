//! Search-grounded model access for the hackathon radar.
//!
//! - [`SearchBackend`]: the seam the scrape pipeline calls through.
//! - [`GeminiClient`]: REST client for Gemini with Google Search grounding.
//! - [`prompt`]: the hackathon discovery prompt.

pub mod backend;
pub mod config;
pub mod gemini;
pub mod prompt;

pub use backend::{SearchBackend, SearchError};
pub use config::SearchConfig;
pub use gemini::GeminiClient;

//! Hackathon candidates produced by the scrape pipeline.

use crate::types::Timestamp;

/// Source tag stamped on every record the search pipeline produces.
pub const SOURCE_TAG: &str = "gemini_search";

/// Default number of hackathons requested per scrape cycle.
pub const DEFAULT_LIMIT: usize = 10;

/// A parsed, validated hackathon that has not been stored yet.
///
/// `scraped_at` and `source` are always set by the parser; values the model
/// puts in its answer for those keys are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct HackathonCandidate {
    pub title: String,
    /// `YYYY-MM-DD` or `TBD`.
    pub end_date: String,
    pub website_url: String,
    pub platform: String,
    pub status: String,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub prize_pool: Option<String>,
    pub eligibility: Option<String>,
    pub tags: Vec<String>,
    pub scraped_at: Timestamp,
    pub source: String,
}

impl HackathonCandidate {
    /// Whether two listings refer to the same hackathon.
    ///
    /// Listings match on title OR website url. Empty keys never match so that
    /// records the model left half-filled are not collapsed together.
    pub fn is_same_listing(&self, other: &HackathonCandidate) -> bool {
        keys_match(&self.title, &other.title) || keys_match(&self.website_url, &other.website_url)
    }
}

fn keys_match(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

/// Drop candidates that repeat an earlier candidate of the same batch.
///
/// The first occurrence wins, so the parser's latest-first order decides
/// which duplicate survives.
pub fn dedupe_batch(candidates: Vec<HackathonCandidate>) -> Vec<HackathonCandidate> {
    let mut kept: Vec<HackathonCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|k| k.is_same_listing(&candidate)) {
            kept.push(candidate);
        }
    }
    kept
}

/// Split a comma-separated tag list, trimming whitespace and dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn candidate(title: &str, url: &str) -> HackathonCandidate {
        HackathonCandidate {
            title: title.to_string(),
            end_date: "2099-01-01".to_string(),
            website_url: url.to_string(),
            platform: "devfolio".to_string(),
            status: "open".to_string(),
            description: None,
            organizer: None,
            prize_pool: None,
            eligibility: None,
            tags: Vec::new(),
            scraped_at: Utc::now(),
            source: SOURCE_TAG.to_string(),
        }
    }

    #[test]
    fn same_title_is_same_listing() {
        let a = candidate("HackX", "https://a.io");
        let b = candidate("HackX", "https://b.io");
        assert!(a.is_same_listing(&b));
    }

    #[test]
    fn same_url_is_same_listing() {
        let a = candidate("HackX", "https://a.io");
        let b = candidate("HackY", "https://a.io");
        assert!(a.is_same_listing(&b));
    }

    #[test]
    fn empty_keys_never_match() {
        let a = candidate("HackX", "");
        let b = candidate("HackY", "");
        assert!(!a.is_same_listing(&b));
    }

    #[test]
    fn dedupe_batch_keeps_first_occurrence() {
        let batch = vec![
            candidate("HackX", "https://x.io"),
            candidate("HackY", "https://y.io"),
            candidate("HackX", "https://x2.io"),
            candidate("HackZ", "https://y.io"),
        ];
        let kept = dedupe_batch(batch);
        let titles: Vec<_> = kept.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["HackX", "HackY"]);
        assert_eq!(kept[0].website_url, "https://x.io");
    }

    #[test]
    fn split_tags_trims_and_drops_blanks() {
        assert_eq!(split_tags(" ai, web3 ,,  "), vec!["ai", "web3"]);
        assert!(split_tags("").is_empty());
    }
}

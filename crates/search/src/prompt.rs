//! Prompt used to discover hackathons through the search-grounded model.

/// Query used when a scrape is triggered without one.
pub const DEFAULT_QUERY: &str = "popular latest hackathons unstop devfolio hackerearth mlh";

/// Build the discovery prompt for `query`, asking for at most `limit` results.
///
/// The model is told to answer with a bare JSON array; the parser still
/// copes with fenced or quoted answers when it does not comply.
pub fn hackathon_prompt(query: &str, limit: usize) -> String {
    format!(
        r#"Search for the top {limit} most POPULAR and current hackathons from platforms like Unstop, Devfolio, HackerEarth, MLH, and other hackathon platforms. Focus on hackathons with high participation, good prizes, and reputable organizers.

Query: {query}

Return ONLY a valid JSON array (MAXIMUM {limit} items) where each item has this shape:
[
  {{
    "title": "Hackathon name",
    "end_date": "YYYY-MM-DD (registration deadline or event end date), or TBD if unknown",
    "website_url": "Registration or info URL",
    "platform": "unstop/devfolio/hackerearth/mlh/other",
    "status": "open/upcoming",
    "description": "One sentence summary"
  }}
]

Rules:
- Only include hackathons that are currently open or upcoming.
- Prefer hackathons with the latest end dates and sort by end_date, latest first.
- Return at most {limit} hackathons.
- Return only the JSON array, with no additional text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_query_and_limit() {
        let prompt = hackathon_prompt("ai hackathons india", 7);
        assert!(prompt.contains("Query: ai hackathons india"));
        assert!(prompt.contains("MAXIMUM 7 items"));
        assert!(prompt.contains("\"end_date\""));
    }
}

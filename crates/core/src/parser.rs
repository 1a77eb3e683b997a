//! Parsing of search-model answers into hackathon candidates.
//!
//! The model is asked for a bare JSON array but regularly wraps it in a
//! markdown code fence, quotes it, or fills fields with numbers instead of
//! strings. [`parse_search_response`] accepts all of those and never fails:
//! anything it cannot read yields an empty result, and a record without a
//! title or whose end date is unreadable or already past is dropped without
//! affecting its siblings.

use serde_json::{Map, Value};

use crate::end_date::{latest_first, EndDate};
use crate::hackathon::{split_tags, HackathonCandidate, SOURCE_TAG};
use crate::types::Timestamp;

/// Parse a raw model answer into at most `limit` validated candidates.
///
/// Candidates are stamped with `now` and [`SOURCE_TAG`], records ending
/// strictly before `now`'s UTC date are dropped, and the survivors are sorted
/// latest end date first with `TBD` last.
pub fn parse_search_response(raw: &str, limit: usize, now: Timestamp) -> Vec<HackathonCandidate> {
    let Some(items) = decode_array(raw, true) else {
        return Vec::new();
    };

    let today = now.date_naive();
    let mut candidates: Vec<HackathonCandidate> = items
        .into_iter()
        .take(limit)
        .filter_map(|item| match item {
            Value::Object(fields) => Some(fields),
            other => {
                tracing::debug!(element = %other, "Skipping non-object search result");
                None
            }
        })
        .filter_map(|fields| {
            if fields.get("title").and_then(value_text).is_none() {
                tracing::debug!("Dropping result without a title");
                return None;
            }
            let end_date = match fields.get("end_date") {
                None | Some(Value::Null) => EndDate::Tbd,
                Some(value) => {
                    let raw_date = value_text(value).unwrap_or_default();
                    match EndDate::parse(&raw_date) {
                        Some(parsed) => parsed,
                        None => {
                            tracing::debug!(end_date = %raw_date, "Dropping result with unreadable end date");
                            return None;
                        }
                    }
                }
            };
            if end_date.is_expired(today) {
                tracing::debug!(%end_date, "Dropping result that already ended");
                return None;
            }
            Some(build_candidate(&fields, end_date, now))
        })
        .collect();

    candidates.sort_by(|a, b| latest_first(&a.end_date, &b.end_date));
    candidates
}

/// Remove a surrounding markdown code fence, if any.
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` openers. Text
/// without a fence is returned trimmed and otherwise untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Decode the fenced-or-bare payload as a JSON array.
///
/// A one-element array holding a string is unwrapped once and that string is
/// decoded in turn; the model sometimes quotes its whole fenced answer.
fn decode_array(raw: &str, unwrap_quoted: bool) -> Option<Vec<Value>> {
    let payload = strip_code_fence(raw);
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Search response is not valid JSON");
            return None;
        }
    };

    match value {
        Value::Array(items) => match items.as_slice() {
            [Value::String(inner)] if unwrap_quoted => decode_array(inner, false),
            _ => Some(items),
        },
        other => {
            tracing::warn!(kind = json_kind(&other), "Search response is not a JSON array");
            None
        }
    }
}

fn build_candidate(fields: &Map<String, Value>, end_date: EndDate, now: Timestamp) -> HackathonCandidate {
    let text = |key: &str| fields.get(key).and_then(value_text);

    let tags = match fields.get("tags") {
        Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
        Some(value) => value_text(value).map(|t| split_tags(&t)).unwrap_or_default(),
        None => Vec::new(),
    };

    HackathonCandidate {
        title: text("title").unwrap_or_default(),
        end_date: end_date.to_string(),
        website_url: text("website_url").unwrap_or_default(),
        platform: text("platform").unwrap_or_default(),
        status: text("status").unwrap_or_default(),
        description: text("description"),
        organizer: text("organizer"),
        prize_pool: text("prize_pool"),
        eligibility: text("eligibility"),
        tags,
        scraped_at: now,
        source: SOURCE_TAG.to_string(),
    }
}

/// Render a scalar JSON value as trimmed text. Blank strings, nulls and
/// containers yield `None`.
fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::end_date::TBD;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap()
    }

    fn parse(raw: &str) -> Vec<HackathonCandidate> {
        parse_search_response(raw, 10, now())
    }

    fn titles(candidates: &[HackathonCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.title.as_str()).collect()
    }

    const SAMPLE: &str = r#"[
        {"title": "Alpha", "end_date": "2030-07-01", "website_url": "https://alpha.dev", "platform": "devfolio", "status": "open"},
        {"title": "Beta", "end_date": "TBD", "website_url": "https://beta.dev", "platform": "unstop", "status": "upcoming"},
        {"title": "Gamma", "end_date": "2031-01-15", "website_url": "https://gamma.dev", "platform": "mlh", "status": "open"}
    ]"#;

    // -- Fences -------------------------------------------------------------

    #[test]
    fn fenced_scenario_parses_one_record() {
        let raw = "```json\n[{\"title\":\"HackX\",\"end_date\":\"2099-01-01\",\"website_url\":\"https://x.io\"}]\n```";
        let parsed = parse(raw);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "HackX");
        assert_eq!(parsed[0].end_date, "2099-01-01");
        assert_eq!(parsed[0].website_url, "https://x.io");
    }

    #[test]
    fn quoted_fenced_answer_is_unwrapped() {
        let raw = r#"["```json\n[{\"title\":\"HackX\",\"end_date\":\"2099-01-01\",\"website_url\":\"https://x.io\"}]\n```"]"#;
        let parsed = parse(raw);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].end_date, "2099-01-01");
    }

    #[test]
    fn fence_does_not_change_result() {
        for fenced in [
            format!("```json\n{SAMPLE}\n```"),
            format!("```\n{SAMPLE}\n```"),
            format!("  ```JSON{SAMPLE}```  "),
        ] {
            assert_eq!(parse(&fenced), parse(SAMPLE));
        }
    }

    #[test]
    fn strip_code_fence_leaves_bare_text() {
        assert_eq!(strip_code_fence("  [1, 2] "), "[1, 2]");
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
    }

    // -- Decoding failures --------------------------------------------------

    #[test]
    fn empty_array_yields_nothing() {
        assert!(parse("[]").is_empty());
    }

    #[test]
    fn non_array_json_yields_nothing() {
        assert!(parse(r#"{"title": "HackX"}"#).is_empty());
        assert!(parse("42").is_empty());
    }

    #[test]
    fn malformed_json_yields_nothing() {
        assert!(parse("Here are some hackathons: [").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let parsed = parse(r#"[1, "x", {"title": "Alpha", "end_date": "TBD"}]"#);
        assert_eq!(titles(&parsed), vec!["Alpha"]);
    }

    // -- Date validation ----------------------------------------------------

    #[test]
    fn past_records_are_dropped_and_today_is_kept() {
        let parsed = parse(
            r#"[
                {"title": "Yesterday", "end_date": "2030-06-09"},
                {"title": "Today", "end_date": "2030-06-10"},
                {"title": "Unknown", "end_date": "TBD"}
            ]"#,
        );
        assert_eq!(titles(&parsed), vec!["Today", "Unknown"]);
    }

    #[test]
    fn unreadable_date_drops_only_that_record() {
        let parsed = parse(
            r#"[
                {"title": "Vague", "end_date": "sometime in July"},
                {"title": "Alpha", "end_date": "2030-07-01"}
            ]"#,
        );
        assert_eq!(titles(&parsed), vec!["Alpha"]);
    }

    #[test]
    fn end_date_is_normalized() {
        let parsed = parse(r#"[{"title": "Alpha", "end_date": "2030-07-01T18:00:00Z"}]"#);
        assert_eq!(parsed[0].end_date, "2030-07-01");
    }

    #[test]
    fn missing_end_date_is_treated_as_tbd() {
        let parsed = parse(r#"[{"title": "Alpha"}]"#);
        assert_eq!(parsed[0].end_date, TBD);
    }

    // -- Truncation and sorting ---------------------------------------------

    #[test]
    fn truncates_before_filtering() {
        let parsed = parse_search_response(
            r#"[
                {"title": "Old", "end_date": "2020-01-01"},
                {"title": "Alpha", "end_date": "2030-07-01"},
                {"title": "Beta", "end_date": "2030-08-01"}
            ]"#,
            2,
            now(),
        );
        assert_eq!(titles(&parsed), vec!["Alpha"]);
    }

    #[test]
    fn sorted_latest_first_with_tbd_last() {
        let parsed = parse(SAMPLE);
        assert_eq!(titles(&parsed), vec!["Gamma", "Alpha", "Beta"]);
        for pair in parsed.windows(2) {
            assert_ne!(
                latest_first(&pair[0].end_date, &pair[1].end_date),
                std::cmp::Ordering::Greater
            );
        }
    }

    // -- Metadata -----------------------------------------------------------

    #[test]
    fn metadata_is_set_by_parser() {
        let parsed = parse(
            r#"[{"title": "Alpha", "end_date": "TBD", "source": "model", "scraped_at": "1999-01-01T00:00:00Z"}]"#,
        );
        assert_eq!(parsed[0].source, SOURCE_TAG);
        assert_eq!(parsed[0].scraped_at, now());
    }

    #[test]
    fn partial_fields_are_kept() {
        let parsed = parse(
            r#"[{"title": "Alpha", "end_date": "2030-07-01", "prize_pool": 5000, "tags": ["ai", " web "]}]"#,
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Alpha");
        assert_eq!(parsed[0].website_url, "");
        assert_eq!(parsed[0].description, None);
        assert_eq!(parsed[0].prize_pool.as_deref(), Some("5000"));
        assert_eq!(parsed[0].tags, vec!["ai", "web"]);
    }

    #[test]
    fn untitled_results_are_dropped() {
        let parsed = parse(
            r#"[
                {"end_date": "TBD", "description": "a"},
                {"title": "  ", "end_date": "TBD", "description": "b"},
                {"title": null, "website_url": "https://nameless.dev"},
                {"title": "Alpha", "end_date": "TBD"}
            ]"#,
        );
        assert_eq!(titles(&parsed), vec!["Alpha"]);
    }

    #[test]
    fn comma_separated_tags_are_split() {
        let parsed = parse(r#"[{"title": "Alpha", "tags": "ai, fintech"}]"#);
        assert_eq!(parsed[0].tags, vec!["ai", "fintech"]);
    }
}

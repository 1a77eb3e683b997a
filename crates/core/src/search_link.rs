//! Keyword search redirects for stored hackathons.

use url::Url;

/// Search engine used for the "find more" redirect.
pub const SEARCH_ENGINE_URL: &str = "https://www.google.com/search";

/// Keyword query for a hackathon: title, platform, "hackathon" and the year.
///
/// A blank platform is left out rather than producing a double space.
pub fn search_query(title: &str, platform: &str, year: i32) -> String {
    [title.trim(), platform.trim(), "hackathon", &year.to_string()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full search-engine URL for a hackathon, with the query form-encoded.
pub fn search_url(title: &str, platform: &str, year: i32) -> String {
    let query = search_query(title, platform, year);
    Url::parse_with_params(SEARCH_ENGINE_URL, &[("q", query.as_str())])
        .expect("SEARCH_ENGINE_URL must be a valid URL")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joins_parts() {
        assert_eq!(
            search_query("Smart India", "unstop", 2030),
            "Smart India unstop hackathon 2030"
        );
    }

    #[test]
    fn query_skips_blank_platform() {
        assert_eq!(search_query("HackX ", "  ", 2030), "HackX hackathon 2030");
    }

    #[test]
    fn url_is_form_encoded() {
        assert_eq!(
            search_url("Hack & Build", "mlh", 2030),
            "https://www.google.com/search?q=Hack+%26+Build+mlh+hackathon+2030"
        );
    }
}

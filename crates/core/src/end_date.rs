//! End-date handling for hackathon records.
//!
//! Stored end dates are plain text: either a zero-padded `YYYY-MM-DD` date or
//! the [`TBD`] sentinel. Zero padding makes lexicographic order match
//! chronological order, which both the sort in the parser and the expiry
//! filter in the store rely on.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// Sentinel end date meaning "date unknown". Never expires.
pub const TBD: &str = "TBD";

/// Storage format for real end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    Tbd,
    Date(NaiveDate),
}

impl EndDate {
    /// Parse a model-supplied end date.
    ///
    /// `TBD` is matched case-insensitively. Anything else must carry a
    /// `YYYY-MM-DD` date in its first 10 characters; trailing time or zone
    /// information is ignored. Returns `None` when no date can be read.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(TBD) {
            return Some(Self::Tbd);
        }
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, DATE_FORMAT)
            .ok()
            .map(Self::Date)
    }

    /// Whether the date lies strictly before `today`. `TBD` is never expired.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match self {
            Self::Tbd => false,
            Self::Date(date) => *date < today,
        }
    }
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tbd => f.write_str(TBD),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// Today's date in the storage format, used as the expiry cutoff.
pub fn cutoff_string(today: NaiveDate) -> String {
    today.format(DATE_FORMAT).to_string()
}

/// Order two stored end dates latest-first, with `TBD` after every real date.
pub fn latest_first(a: &str, b: &str) -> Ordering {
    match (a == TBD, b == TBD) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.cmp(a),
    }
}

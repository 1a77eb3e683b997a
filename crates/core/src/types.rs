use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a path segment into a [`DbId`].
///
/// Ids are positive; anything else is a validation error rather than a
/// lookup that can only miss.
pub fn parse_db_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("Invalid id: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(parse_db_id("42").unwrap(), 42);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "0", "-3", "64f1c0ffee"] {
            assert!(parse_db_id(raw).is_err(), "{raw} should be rejected");
        }
    }
}

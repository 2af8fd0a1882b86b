//! Query-string access
//!
//! Parameters are read as an ordered list of pairs so a repeated key is not
//! a deserialization failure; handlers take the first value.

use axum::extract::{rejection::QueryRejection, Query};

use crate::error::ApiError;

/// Query string as decoded `(key, value)` pairs, in request order
pub type QueryPairs = Vec<(String, String)>;

/// Unwrap the extractor result, turning a rejection into a 400
pub fn pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<QueryPairs, ApiError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// First value given for `name`
pub fn first<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_of(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_takes_earliest_value() {
        let pairs = pairs_of(&[("id", "1"), ("q", "x"), ("id", "2")]);
        assert_eq!(first(&pairs, "id"), Some("1"));
        assert_eq!(first(&pairs, "q"), Some("x"));
        assert_eq!(first(&pairs, "missing"), None);
    }

    #[test]
    fn test_first_keeps_empty_value() {
        let pairs = pairs_of(&[("id", "")]);
        assert_eq!(first(&pairs, "id"), Some(""));
    }
}

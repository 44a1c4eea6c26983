/// Input validation utilities: pure predicates run before any store access.
use crate::error::AppError;

/// Validates the syntactic shape of a record identifier (hyphenated UUID:
/// 36 characters, hyphens at positions 8/13/18/23, hex digits elsewhere).
///
/// Pure predicate — malformed input is rejected without a store round-trip.
pub fn is_valid_identifier(raw: &str) -> bool {
    if raw.len() != 36 {
        return false;
    }

    raw.bytes().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Parse a score out of a JSON value, accepting only integers representable
/// as i64. Floats, strings, booleans and null are rejected rather than
/// coerced.
pub fn parse_score(value: &serde_json::Value) -> Result<i64, AppError> {
    value
        .as_i64()
        .ok_or_else(|| AppError::InvalidScore(format!("expected an integer score, got {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_identifier() {
        assert!(is_valid_identifier("00000000-0000-0000-0000-000000000000"));
        assert!(is_valid_identifier("a1b2c3d4-e5f6-7a8b-9c0d-e1f2a3b4c5d6"));
        assert!(is_valid_identifier("A1B2C3D4-E5F6-7A8B-9C0D-E1F2A3B4C5D6"));
    }

    #[test]
    fn test_identifier_wrong_length() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("a1b2c3d4"));
        assert!(!is_valid_identifier("00000000-0000-0000-0000-0000000000000"));
    }

    #[test]
    fn test_identifier_non_hex_characters() {
        assert!(!is_valid_identifier("g0000000-0000-0000-0000-000000000000"));
        assert!(!is_valid_identifier("00000000-0000-0000-0000-00000000000z"));
    }

    #[test]
    fn test_identifier_misplaced_hyphens() {
        assert!(!is_valid_identifier("000000000000-0000-0000-000000000000"));
        assert!(!is_valid_identifier("00000000000000000000000000000000----"));
    }

    #[test]
    fn test_parse_score_accepts_integers() {
        assert_eq!(parse_score(&json!(0)).unwrap(), 0);
        assert_eq!(parse_score(&json!(90)).unwrap(), 90);
        assert_eq!(parse_score(&json!(-15)).unwrap(), -15);
        assert_eq!(parse_score(&json!(i64::MAX)).unwrap(), i64::MAX);
    }

    #[test]
    fn test_parse_score_rejects_non_integers() {
        assert!(parse_score(&json!(1.5)).is_err());
        assert!(parse_score(&json!("90")).is_err());
        assert!(parse_score(&json!(true)).is_err());
        assert!(parse_score(&json!(null)).is_err());
        assert!(parse_score(&json!(u64::MAX)).is_err());
    }
}

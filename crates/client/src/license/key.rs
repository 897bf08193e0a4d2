//! License key shape checks and input cleanup.
//!
//! Keys look like `FCLP-1234-ABCD-5678-EFGH`: a constant first segment
//! and four segments of uppercase alphanumerics. The shape is all the
//! client ever checks; cryptographic validity is the backend's call.

/// Constant first segment of every key.
pub const KEY_PREFIX: &str = "FCLP";

const KEY_SEGMENTS: usize = 4;
const SEGMENT_LEN: usize = 4;

/// Whether `key` has the exact five-segment dash-delimited shape.
pub fn is_well_formed(key: &str) -> bool {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() != KEY_SEGMENTS + 1 || parts[0] != KEY_PREFIX {
        return false;
    }
    parts[1..].iter().all(|segment| {
        segment.len() == SEGMENT_LEN && segment.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}

/// Clean up pasted key input: strip separators, uppercase, regroup
/// into dash-delimited segments, and drop excess characters.
///
/// The result is only as well-formed as the input had characters for;
/// callers still run [`is_well_formed`] on it.
pub fn normalize_input(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(KEY_PREFIX.len() + KEY_SEGMENTS * SEGMENT_LEN)
        .collect();

    cleaned
        .as_bytes()
        .chunks(SEGMENT_LEN)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_key_accepted() {
        assert!(is_well_formed("FCLP-1234-ABCD-5678-EFGH"));
        assert!(is_well_formed("FCLP-0000-0000-0000-0000"));
    }

    #[test]
    fn test_malformed_keys_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("FCLP-1234-ABCD-5678"));
        assert!(!is_well_formed("FCLP-1234-ABCD-5678-EFGH-9999"));
        assert!(!is_well_formed("XXXX-1234-ABCD-5678-EFGH"));
        assert!(!is_well_formed("FCLP-12a4-ABCD-5678-EFGH"));
        assert!(!is_well_formed("FCLP-123-ABCD-5678-EFGH"));
        assert!(!is_well_formed("FCLP-1234-AB!D-5678-EFGH"));
    }

    #[test]
    fn test_normalize_regroups_raw_input() {
        assert_eq!(normalize_input("fclp1234abcd5678efgh"), "FCLP-1234-ABCD-5678-EFGH");
        assert_eq!(normalize_input(" fclp 1234-abcd_5678.efgh "), "FCLP-1234-ABCD-5678-EFGH");
    }

    #[test]
    fn test_normalize_drops_excess_characters() {
        assert_eq!(normalize_input("FCLP1234ABCD5678EFGHEXTRA"), "FCLP-1234-ABCD-5678-EFGH");
    }

    #[test]
    fn test_normalize_keeps_short_input_short() {
        assert_eq!(normalize_input("fclp12"), "FCLP-12");
        assert!(!is_well_formed(&normalize_input("fclp12")));
    }

    #[test]
    fn test_normalize_then_check_round_trip() {
        let normalized = normalize_input("fclp-1234-abcd-5678-efgh");
        assert!(is_well_formed(&normalized));
    }
}

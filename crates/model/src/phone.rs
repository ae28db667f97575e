//! Egyptian mobile number validation. A valid number is exactly 11 digits:
//! `01`, then one of `0`, `1`, `2`, `5` (Vodafone/Etisalat/Orange/WE
//! prefixes), then 8 more digits.

use {regex::Regex, std::sync::LazyLock};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^01[0125][0-9]{8}$").unwrap());

/// Returns true iff `phone`, with all whitespace stripped, matches the
/// Egyptian mobile pattern. There is no partial-match leniency.
pub fn is_valid(phone: &str) -> bool {
    PHONE_PATTERN.is_match(&strip_whitespace(phone))
}

/// Removes every whitespace character. Used both for validation and for
/// normalizing the number before it is stored.
pub fn strip_whitespace(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_valid_prefixes() {
        for prefix in ["010", "011", "012", "015"] {
            assert!(is_valid(&format!("{prefix}12345678")), "{prefix}");
        }
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(!is_valid("01312345678"));
        assert!(!is_valid("01412345678"));
        assert!(!is_valid("02012345678"));
        assert!(!is_valid("11012345678"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid("0101234567"));
        assert!(!is_valid("010123456789"));
        assert!(!is_valid(""));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(!is_valid("01o12345678"));
        assert!(!is_valid("٠١٠١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn strips_whitespace_before_matching() {
        assert!(is_valid("010 1234 5678"));
        assert!(is_valid(" 01012345678\t"));
        assert_eq!(strip_whitespace("010 1234 5678"), "01012345678");
    }
}

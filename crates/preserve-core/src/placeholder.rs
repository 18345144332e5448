//! Placeholder grammar: `__ID<key>__` with `<key>` a decimal integer.

use regex::Regex;
use std::sync::LazyLock;

/// Matches any placeholder; group 1 holds the key digits.
pub static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__ID(\d+)__").unwrap());

/// Render the placeholder for `key`.
pub fn placeholder(key: usize) -> String {
    format!("__ID{}__", key)
}

/// Parse the digits of a placeholder back into a key.
///
/// Only the canonical rendering is accepted, so `01` or digits that overflow
/// `usize` yield `None`.
pub fn parse_key(digits: &str) -> Option<usize> {
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_format() {
        assert_eq!(placeholder(0), "__ID0__");
        assert_eq!(placeholder(42), "__ID42__");
    }

    #[test]
    fn test_grammar_matches_rendered_placeholders() {
        let caps = PLACEHOLDER.captures("<li>__ID17__</li>").unwrap();
        assert_eq!(&caps[0], "__ID17__");
        assert_eq!(&caps[1], "17");
    }

    #[test]
    fn test_grammar_rejects_near_misses() {
        assert!(!PLACEHOLDER.is_match("__ID__"));
        assert!(!PLACEHOLDER.is_match("__IDx__"));
        assert!(!PLACEHOLDER.is_match("_ID1__"));
        assert!(!PLACEHOLDER.is_match("__id1__"));
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("0"), Some(0));
        assert_eq!(parse_key("123"), Some(123));
        assert_eq!(parse_key("007"), None);
        assert_eq!(parse_key("99999999999999999999999999"), None);
    }
}

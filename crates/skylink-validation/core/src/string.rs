//! String validation functions

/// Length in characters, not bytes
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// At least `min` characters
pub fn has_min_chars(s: &str, min: usize) -> bool {
    char_count(s) >= min
}

/// Between `min` and `max` characters, inclusive
pub fn has_length_between(s: &str, min: usize, max: usize) -> bool {
    let len = char_count(s);
    len >= min && len <= max
}

/// Removes every whitespace character, including interior ones
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Only ASCII digits, between `min` and `max` of them
pub fn is_digits_between(s: &str, min: usize, max: usize) -> bool {
    s.chars().all(|c| c.is_ascii_digit()) && has_length_between(s, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars() {
        assert!(has_min_chars("abcdef", 6));
        assert!(!has_min_chars("abcde", 6));
        // Multi-byte characters count once
        assert!(has_min_chars("éééééé", 6));
        assert!(!has_min_chars("ééé", 6));
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace("4111 1111\t1111 1111"), "4111111111111111");
        assert_eq!(strip_whitespace("   "), "");
    }

    #[test]
    fn test_digits_between() {
        assert!(is_digits_between("123", 3, 4));
        assert!(is_digits_between("1234", 3, 4));
        assert!(!is_digits_between("12", 3, 4));
        assert!(!is_digits_between("12345", 3, 4));
        assert!(!is_digits_between("12a", 3, 4));
        assert!(!is_digits_between("", 3, 4));
        // Non-ASCII digits are rejected
        assert!(!is_digits_between("١٢٣", 3, 4));
    }
}

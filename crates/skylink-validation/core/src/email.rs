//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Permissive: no whitespace, one '@', a '.' somewhere after it
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Validates basic email format
///
/// Checks for:
/// - No whitespace anywhere
/// - Exactly one '@' with content on both sides
/// - At least one '.' in the domain part, not at its edges
///
/// Looser than RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

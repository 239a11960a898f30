//! Email syntax check used before a user is created.

use regex::Regex;
use std::sync::LazyLock;

/// `atom(.atom)*@label(.label)*.tld` with an alphabetic TLD of two or more
/// letters. Labels start and end with a letter or digit.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$",
    ))
    .expect("EMAIL_REGEX is a valid regex pattern")
});

/// Minimum accepted email length.
const MIN_EMAIL_LENGTH: usize = 3;

/// Maximum allowed email length (per RFC 5321).
const MAX_EMAIL_LENGTH: usize = 254;

/// Returns `true` if `candidate` looks like a deliverable email address.
///
/// No trimming is done: surrounding whitespace makes the address invalid.
///
/// ```
/// use user_store::validators::is_email_valid;
///
/// assert!(is_email_valid("a@b.co"));
/// assert!(!is_email_valid("not-an-email"));
/// ```
pub fn is_email_valid(candidate: &str) -> bool {
    if candidate.len() < MIN_EMAIL_LENGTH || candidate.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    EMAIL_REGEX.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_standard_email() {
        assert!(is_email_valid("user@example.com"));
        assert!(is_email_valid("a@b.co"));
    }

    #[test]
    fn test_valid_email_with_plus_addressing() {
        assert!(is_email_valid("user+tag@example.com"));
    }

    #[test]
    fn test_valid_email_with_subdomain() {
        assert!(is_email_valid("user.name@mail.example.com"));
    }

    #[test]
    fn test_valid_email_with_hyphen_in_domain() {
        assert!(is_email_valid("user@my-example.com"));
    }

    #[test]
    fn test_invalid_email_empty() {
        assert!(!is_email_valid(""));
    }

    #[test]
    fn test_invalid_email_no_at_symbol() {
        assert!(!is_email_valid("not-an-email"));
        assert!(!is_email_valid("user.example.com"));
    }

    #[test]
    fn test_invalid_email_no_dot_in_domain() {
        assert!(!is_email_valid("user@example"));
    }

    #[test]
    fn test_invalid_email_no_local_part() {
        assert!(!is_email_valid("@example.com"));
    }

    #[test]
    fn test_invalid_email_no_domain() {
        assert!(!is_email_valid("user@"));
        assert!(!is_email_valid("user@.com"));
    }

    #[test]
    fn test_invalid_email_misplaced_dots() {
        assert!(!is_email_valid(".a@b.co"));
        assert!(!is_email_valid("a.@b.co"));
        assert!(!is_email_valid("a..b@c.co"));
        assert!(!is_email_valid("a@b..co"));
    }

    #[test]
    fn test_invalid_email_dash_only_or_dash_edged_label() {
        assert!(!is_email_valid("a@-.co"));
        assert!(!is_email_valid("a@-b.co"));
        assert!(!is_email_valid("a@b-.co"));
    }

    #[test]
    fn test_invalid_email_double_at() {
        assert!(!is_email_valid("user@@example.com"));
    }

    #[test]
    fn test_invalid_email_short_or_numeric_tld() {
        assert!(!is_email_valid("user@example.c"));
        assert!(!is_email_valid("user@example.123"));
    }

    #[test]
    fn test_invalid_email_whitespace() {
        assert!(!is_email_valid("us er@example.com"));
        assert!(!is_email_valid(" user@example.com"));
    }

    #[test]
    fn test_invalid_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(!is_email_valid(&email));
    }
}

//! Form field validators shared by every form-bearing view
//!
//! Pure functions, no I/O. Required-ness is a separate check from shape:
//! `email` and `confirmation_code` accept an empty value and leave it to
//! [`required`] to flag.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

// Permissive RFC-5322-like pattern; a dedicated address parser would be
// stricter but this matches what the backend itself accepts.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\].,;:\s@"]+(\.[^<>()\[\].,;:\s@"]+)*)|(".+"))@(([^<>()\[\].,;:\s@"]+\.)+[^<>()\[\].,;:\s@"]{2,})$"#,
    )
    .expect("email pattern")
});

/// Validate the shape of an email address. Empty input is not flagged.
pub fn email(value: &str) -> Option<&'static str> {
    if !value.is_empty() && !EMAIL_RE.is_match(value.trim()) {
        Some("Invalid email")
    } else {
        None
    }
}

/// Validate a password against the account policy.
pub fn password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Password is required");
    }

    if value.chars().count() < 8 {
        return Some("Password must be at least 8 characters");
    }

    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter");
    }

    None
}

/// Validate the shape of an emailed confirmation code. Empty input is not
/// flagged.
pub fn confirmation_code(value: &str) -> Option<&'static str> {
    let well_formed = value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit());
    if !value.is_empty() && !well_formed {
        Some("Invalid confirmation code")
    } else {
        None
    }
}

/// A submitted form value. Forms mix text inputs with numeric inputs such
/// as donation amounts, and the two have different notions of "empty".
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    // A field satisfies required-ness when it is non-empty text or any
    // number including exactly zero; NaN counts as missing. A zero
    // donation amount is present (it may still fail a positivity check
    // elsewhere).
    fn is_dirty(&self) -> bool {
        match self {
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::Number(value) => !value.is_nan(),
        }
    }
}

/// Check required-ness for a set of fields; absent or empty fields map to
/// `"Required"`.
pub fn required<'a>(
    required_fields: &[&'a str],
    values: &HashMap<&str, FieldValue>,
) -> HashMap<&'a str, &'static str> {
    let mut errors = HashMap::new();
    for field in required_fields {
        let dirty = values.get(*field).map(FieldValue::is_dirty).unwrap_or(false);
        if !dirty {
            errors.insert(*field, "Required");
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_ordinary_addresses() {
        assert_eq!(email("a@b.com"), None);
        assert_eq!(email("first.last@church.example.org"), None);
        // Surrounding whitespace is trimmed before matching.
        assert_eq!(email(" a@b.com "), None);
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert_eq!(email("not-an-email"), Some("Invalid email"));
        assert_eq!(email("a@b"), Some("Invalid email"));
        assert_eq!(email("a b@c.com"), Some("Invalid email"));
    }

    #[test]
    fn email_leaves_empty_input_to_required() {
        assert_eq!(email(""), None);
    }

    #[test]
    fn password_policy_order() {
        assert_eq!(password(""), Some("Password is required"));
        assert_eq!(password("short1A"), Some("Password must be at least 8 characters"));
        assert_eq!(
            password("longenough"),
            Some("Password must contain at least one uppercase letter")
        );
        assert_eq!(password("LongEnough1"), None);
    }

    #[test]
    fn password_length_boundary_is_strict() {
        // Exactly eight characters passes the length check.
        assert_eq!(password("Abcdefgh"), None);
        assert_eq!(password("Abcdefg"), Some("Password must be at least 8 characters"));
    }

    #[test]
    fn required_flags_missing_and_empty_fields() {
        let mut values = HashMap::new();
        values.insert("email", FieldValue::text(""));
        let errors = required(&["email", "password"], &values);
        assert_eq!(errors.get("email"), Some(&"Required"));
        assert_eq!(errors.get("password"), Some(&"Required"));
    }

    #[test]
    fn required_treats_zero_as_present() {
        let mut values = HashMap::new();
        values.insert("amount", FieldValue::Number(0.0));
        let errors = required(&["amount"], &values);
        assert!(errors.is_empty());
    }

    #[test]
    fn required_treats_nan_as_missing() {
        let mut values = HashMap::new();
        values.insert("amount", FieldValue::Number(f64::NAN));
        let errors = required(&["amount"], &values);
        assert_eq!(errors.get("amount"), Some(&"Required"));
    }

    #[test]
    fn confirmation_code_is_six_digits() {
        assert_eq!(confirmation_code("123456"), None);
        assert_eq!(confirmation_code(""), None);
        assert_eq!(confirmation_code("12345"), Some("Invalid confirmation code"));
        assert_eq!(confirmation_code("12345a"), Some("Invalid confirmation code"));
    }
}

//! Member profile normalisation and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of a member name after normalisation.
pub const MAX_NAME_LEN: usize = 120;

/// Bangladeshi mobile numbers: `01XNNNNNNNN` or `+8801XNNNNNNNN` with X in 3..9.
const PHONE_PATTERN: &str = r"^(?:\+880|0)1[3-9]\d{8}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Trim a name and collapse runs of internal whitespace to single spaces.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalise and validate a required member name.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

/// Strip spaces, dashes and parentheses from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Normalise and validate a Bangladeshi mobile number.
pub fn validate_phone(phone: &str) -> Result<String, CoreError> {
    let normalized = normalize_phone(phone);
    if PHONE_RE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(CoreError::Validation(format!(
            "Invalid phone number format: '{phone}'"
        )))
    }
}

/// Treat blank optional text as absent and trim the rest.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_is_trimmed_and_collapsed() {
        assert_eq!(normalize_name("  Abdul   Karim \t"), "Abdul Karim");
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_name_rejected() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert_matches!(validate_name(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn local_phone_accepted() {
        assert_eq!(validate_phone("01712345678").unwrap(), "01712345678");
    }

    #[test]
    fn international_phone_with_separators_accepted() {
        assert_eq!(
            validate_phone("+880 1712-345678").unwrap(),
            "+8801712345678"
        );
        assert_eq!(validate_phone("(017) 1234 5678").unwrap(), "01712345678");
    }

    #[test]
    fn bad_phones_rejected() {
        for bad in ["01212345678", "0171234567", "017123456789", "phone", ""] {
            assert_matches!(validate_phone(bad), Err(CoreError::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn non_blank_filters_empty() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" Dhaka ")).as_deref(), Some("Dhaka"));
    }
}

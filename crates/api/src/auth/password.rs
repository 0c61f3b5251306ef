//! Admin password hashing.
//!
//! Stored hashes are Argon2id PHC strings, so the salt and cost parameters
//! travel with the digest and older hashes keep verifying if defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use fds_core::error::CoreError;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored value is not a usable
/// PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Err(password_hash::Error::Password) => Ok(false),
        other => other.map(|()| true),
    }
}

/// Reject passwords that are too short or made only of whitespace.
pub fn check_new_password(password: &str) -> Result<(), CoreError> {
    if password.trim().is_empty() {
        return Err(CoreError::Validation("Password must not be blank".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_is_argon2id_and_salted() {
        let first = hash_password("admin123").unwrap();
        let second = hash_password("admin123").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("admin123", &first).unwrap());
        assert!(verify_password("admin123", &second).unwrap());
    }

    #[test]
    fn mismatch_is_not_an_error() {
        let hash = hash_password("admin123").unwrap();
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn corrupt_stored_hash_is_an_error() {
        assert!(verify_password("admin123", "plaintext-admin123").is_err());
    }

    #[test]
    fn new_password_rules() {
        assert_matches!(check_new_password("short"), Err(CoreError::Validation(_)));
        assert_matches!(check_new_password("          "), Err(CoreError::Validation(_)));
        // Seven characters, fourteen bytes.
        assert_matches!(check_new_password("ñññññññ"), Err(CoreError::Validation(_)));
        assert_matches!(check_new_password("exactly8"), Ok(()));
    }
}

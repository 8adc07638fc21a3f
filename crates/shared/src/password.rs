//! Password hashing and strength policy.
//!
//! Hashes use Argon2id with OWASP parameters and are stored in PHC format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

const MEMORY_COST: u32 = 19456; // KiB
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Invalid Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password, returning a PHC string.
///
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("Campus#2024").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// Parameters are read back from the hash, so older hashes keep verifying
/// after the cost settings change.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Returns every strength rule the password breaks.
///
/// An empty vector means the password is acceptable.
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one number");
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        violations.push("Password must contain at least one special character");
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("Campus#2024").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_hash_password_produces_unique_hashes() {
        let a = hash_password("same_password").unwrap();
        let b = hash_password("same_password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("Campus#2024").unwrap();
        assert!(verify_password("Campus#2024", &hash).unwrap());
        assert!(!verify_password("campus#2024", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "$2a$12$bcrypt-style-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_strong_password_has_no_violations() {
        assert!(password_violations("Campus#2024").is_empty());
        assert!(password_violations("Xy9!abcd").is_empty());
    }

    #[test]
    fn test_short_password() {
        let violations = password_violations("Ab1!");
        assert_eq!(violations, vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn test_password_missing_character_classes() {
        let violations = password_violations("alllowercase");
        assert!(violations.contains(&"Password must contain at least one uppercase letter"));
        assert!(violations.contains(&"Password must contain at least one number"));
        assert!(violations.contains(&"Password must contain at least one special character"));
        assert!(!violations.contains(&"Password must contain at least one lowercase letter"));
    }

    #[test]
    fn test_unicode_counts_as_special() {
        assert!(password_violations("Passw0rdé").is_empty());
    }

    #[test]
    fn test_password_error_display() {
        let err = PasswordError::HashError("boom".to_string());
        assert!(err.to_string().contains("boom"));
        assert_eq!(
            PasswordError::InvalidHashFormat.to_string(),
            "Invalid password hash format"
        );
    }
}

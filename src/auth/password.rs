//! Password hashing and verification.
//!
//! Uses Argon2id with a fresh random salt per hash. The salt and the
//! algorithm parameters are embedded in the PHC output string, so a
//! stored hash is all that is needed to verify later.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Errors from the hashing primitive itself. Verification failures are
/// not errors; they are a normal `false` result.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Hashes a plaintext password into a PHC-format string.
///
/// The plaintext is never logged or stored.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// Argon2 compares in constant time internally. A mismatch or an
/// unparseable hash both come back as `false`.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_password("supersecret").unwrap();
        assert!(!hash.contains("supersecret"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_garbage_hash_is_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}

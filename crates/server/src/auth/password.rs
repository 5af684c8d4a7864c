use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password with Argon2id and a fresh random salt. The result is a
/// PHC-format string stored in `users.password_hash`.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash. A mismatch is
/// `Ok(false)`; only a malformed stored hash is an error.
pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::Malformed)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("stored password hash is malformed: {0}")]
    Malformed(argon2::password_hash::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify("correct horse battery staple", &digest).unwrap());
        assert!(!verify("wrong password", &digest).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }
}

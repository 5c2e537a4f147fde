use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id with a random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`) that is stored as-is.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to hash password: {}", e),
        })
}

/// Verify a password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only an unparseable hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Stored password hash is invalid: {}", e),
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("test_password_123"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(verify_password("test_password_123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(verify_password("anything", "plain-text-not-a-hash").is_err());
    }
}

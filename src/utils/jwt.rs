use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Role at issue time; guards re-read the stored role
    pub role: UserRole,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `user` valid for `expiration_hours` from now.
    pub fn for_user(user: &User, expiration_hours: i64) -> Self {
        let now = Timestamp::now();
        let exp = now.as_second() + SignedDuration::from_hours(expiration_hours).as_secs();

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            iat: now.as_second(),
            exp,
        }
    }

    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })
    }
}

/// Signs an access token for `user` (HS256).
///
/// # Example
/// ```ignore
/// let token = generate_access_token(&user, &settings.jwt.secret, 1)?;
/// ```
pub fn generate_access_token(
    user: &User,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::for_user(user, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Verifies signature and expiry, returning the decoded claims.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized {
        message: format!("Invalid token: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn user() -> User {
        User {
            id: 42,
            name: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: Some("$argon2id$hash".to_string()),
            role: UserRole::Editor,
        }
    }

    #[test]
    fn test_token_round_trip_carries_identity() {
        let token = generate_access_token(&user(), SECRET, 1).unwrap();
        let claims = validate_access_token(&token, SECRET).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.username.as_deref(), Some("ada"));
        assert_eq!(claims.role, UserRole::Editor);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_password_hash_not_in_token() {
        let token = generate_access_token(&user(), SECRET, 1).unwrap();
        let claims = validate_access_token(&token, SECRET).unwrap();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = generate_access_token(&user(), SECRET, 1).unwrap();
        let result = validate_access_token(&token, "another-secret-another-secret-1234");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_expired_token_rejected() {
        // past the default 60s leeway
        let token = generate_access_token(&user(), SECRET, -1).unwrap();
        let result = validate_access_token(&token, SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_access_token("not.a.jwt", SECRET).is_err());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let mut claims = Claims::for_user(&user(), 1);
        claims.sub = "abc".to_string();
        assert!(matches!(claims.user_id(), Err(AppError::Unauthorized { .. })));
    }
}

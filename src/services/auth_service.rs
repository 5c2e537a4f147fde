use std::sync::{Arc, OnceLock};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::repositories::UserStore;
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Credential check and token issuing.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }

    /// Exchanges email and password for a signed access token.
    ///
    /// Unknown email, a user without a stored hash and a wrong password all
    /// yield the same `Unauthorized` error, and each costs one argon2
    /// verification.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let Some(user) = self.store.find_by_email(email).await? else {
            verify_against_placeholder(password);
            return Err(invalid_credentials());
        };

        let Some(hash) = user.password.as_deref() else {
            verify_against_placeholder(password);
            return Err(invalid_credentials());
        };
        let verified = verify_password(password, hash).unwrap_or_else(|e| {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash unreadable");
            false
        });
        if !verified {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(invalid_credentials());
        }

        let token =
            generate_access_token(&user, &self.jwt.secret, self.jwt.access_token_expiration)?;
        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(token)
    }
}

/// Hash checked when there is no stored hash to check.
fn placeholder_hash() -> Option<&'static str> {
    static PLACEHOLDER: OnceLock<Option<String>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| hash_password("placeholder-password").ok())
        .as_deref()
}

fn verify_against_placeholder(password: &str) {
    if let Some(hash) = placeholder_hash() {
        let _ = verify_password(password, hash);
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        message: INVALID_CREDENTIALS.to_string(),
    }
}

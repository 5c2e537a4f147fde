//! JWT authentication and role guard middleware.
//!
//! `auth_middleware` validates the bearer token and stores an [`AuthUser`]
//! in the request extensions. `role_guard` runs after it, reloads the caller
//! from the store and checks the role against the route group's allow list.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::UserRole;
use crate::repositories::UserStore;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Extension type for authenticated user information
///
/// This is added to request extensions after successful authentication
/// and can be extracted in handlers using `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Role as last seen; refreshed by the role guard
    pub role: UserRole,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            username: claims.username,
            role: claims.role,
        })
    }
}

/// JWT authentication middleware
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token fails signature or expiry checks.
///
/// # Example
/// ```ignore
/// Router::new()
///     .route("/protected", get(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// State of one role guard: the store to reload callers from and the roles
/// the guarded routes accept.
#[derive(Clone)]
pub struct RoleGuard {
    store: Arc<dyn UserStore>,
    roles: &'static [UserRole],
}

impl RoleGuard {
    pub fn new(store: Arc<dyn UserStore>, roles: &'static [UserRole]) -> Self {
        Self { store, roles }
    }

    /// Guard admitting administrators only.
    pub fn admin(store: Arc<dyn UserStore>) -> Self {
        Self::new(store, &[UserRole::Admin])
    }
}

/// Role check over the stored record of the authenticated caller.
///
/// Must be layered inside `auth_middleware`. A caller whose record is gone
/// gets 401, one whose current role is not allowed gets 403.
///
/// # Example
/// ```ignore
/// admin_routes
///     .route_layer(middleware::from_fn_with_state(RoleGuard::admin(store), role_guard))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn role_guard(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.user_id)
        .ok_or_else(|| AppError::Unauthorized {
            message: "Authentication required".to_string(),
        })?;

    let user = guard
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "User no longer exists".to_string(),
        })?;

    if !guard.roles.contains(&user.role) {
        tracing::debug!(user_id, role = %user.role, "Role guard rejected request");
        return Err(AppError::Forbidden {
            message: format!("Role '{}' is not allowed to access this resource", user.role),
        });
    }

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        email: user.email,
        username: user.username,
        role: user.role,
    });

    Ok(next.run(request).await)
}

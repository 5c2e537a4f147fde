//! User request handlers.
//!
//! Public routes: create, login, find one, update profile.
//! Admin routes (token guard + role guard): index, role update, delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::{AUTH_TAG, USER_TAG};
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, IndexQuery, LoginRequest, LoginResponse, UpdateRoleRequest,
    UpdateUserRequest, UserResponse,
};
use crate::api::middleware::{RoleGuard, auth_middleware, role_guard};
use crate::error::AppResult;
use crate::models::Pagination;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Creates user-related routes.
///
/// # Routes
/// - `POST /`           - Create a user
/// - `POST /login`      - Exchange credentials for an access token
/// - `GET /{id}`        - Get a user
/// - `PUT /{id}`        - Update name, username, email or password
/// - `GET /`            - Paginated index (admin)
/// - `PUT /{id}/role`   - Change a user's role (admin)
/// - `DELETE /{id}`     - Delete a user (admin)
pub fn user_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(index))
        .routes(routes!(update_role_of_user))
        .routes(routes!(delete_one))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::admin(state.store.clone()),
            role_guard,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    OpenApiRouter::new()
        .routes(routes!(create))
        .routes(routes!(login))
        .routes(routes!(find_one, update_one))
        .merge(admin)
}

/// POST /users - Create a user
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    )
)]
async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create(payload.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /users/login - Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let access_token = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(LoginResponse { access_token }))
}

/// GET /users/{id} - Get a user
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.find_one(id).await?;
    Ok(Json(user.into()))
}

/// GET /users - Paginated user index
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(IndexQuery),
    responses(
        (status = 200, description = "One page of users", body = Pagination<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn index(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IndexQuery>,
) -> AppResult<Json<Pagination<UserResponse>>> {
    let options = query.options(&state.users_route);
    let users = &state.services.users;

    let page = match query.username.as_deref() {
        Some(username) if !username.is_empty() => {
            users.paginate_filter_by_username(&options, username).await?
        }
        _ => users.paginate(&options).await?,
    };

    Ok(Json(page.map(UserResponse::from)))
}

/// PUT /users/{id} - Update profile fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    )
)]
async fn update_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .update_one(id, payload.into_update_user())
        .await?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}/role - Change a user's role
#[utoipa::path(
    put,
    path = "/{id}/role",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn update_role_of_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .update_role_of_user(id, payload.role)
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{id} - Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.delete_one(id).await?;
    Ok(Json(user.into()))
}

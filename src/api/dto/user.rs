//! User-related DTOs for API requests and responses.

use crate::models::{NewUser, UpdateUser, User, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Every field is optional; a role cannot be supplied.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Ada Lovelace", max_length = 255)]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Username must be at most 255 characters"))]
    #[schema(example = "ada", max_length = 255)]
    pub username: Option<String>,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(format = "email", example = "ada@example.com", max_length = 255)]
    pub email: Option<String>,
    #[schema(format = "password", example = "password123")]
    pub password: Option<String>,
}

impl CreateUserRequest {
    /// Converts the request DTO into a NewUser model for insertion.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            username: self.username,
            email: self.email,
            password: self.password,
            role: UserRole::User,
        }
    }
}

/// Request body for updating a user's profile fields.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(max_length = 255)]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Username must be at most 255 characters"))]
    #[schema(max_length = 255)]
    pub username: Option<String>,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(format = "email", max_length = 255)]
    pub email: Option<String>,
    #[schema(format = "password")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Converts the request DTO into an UpdateUser changeset; the role is
    /// never part of it.
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            username: self.username,
            email: self.email,
            password: self.password,
            role: None,
        }
    }
}

/// Request body for `PUT /users/{id}/role`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRoleRequest {
    #[schema(example = "editor")]
    pub role: UserRole,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data (the password hash is never included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_ignores_role_field() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"username":"ada","role":"admin"}"#).unwrap();
        let new_user = request.into_new_user();

        assert_eq!(new_user.username.as_deref(), Some("ada"));
        assert_eq!(new_user.role, UserRole::User);
    }

    #[test]
    fn test_create_request_email_rule() {
        let request = CreateUserRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(CreateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_text_fields_limited_to_column_width() {
        let at_limit = CreateUserRequest {
            name: Some("a".repeat(255)),
            username: Some("b".repeat(255)),
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let long_name = CreateUserRequest {
            name: Some("a".repeat(256)),
            ..Default::default()
        };
        let errors = long_name.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let long_username = UpdateUserRequest {
            username: Some("b".repeat(300)),
            ..Default::default()
        };
        let errors = long_username.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let long_email = UpdateUserRequest {
            email: Some(format!("{}@example.com", "c".repeat(250))),
            ..Default::default()
        };
        assert!(long_email.validate().is_err());
    }

    #[test]
    fn test_update_request_never_touches_role() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"name":"Ada","role":"admin"}"#).unwrap();
        let changes = request.into_update_user();

        assert_eq!(changes.name.as_deref(), Some("Ada"));
        assert!(changes.role.is_none());
    }

    #[test]
    fn test_response_omits_password() {
        let user = User {
            id: 3,
            name: None,
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: Some("$argon2id$secret".to_string()),
            role: UserRole::Editor,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "editor");
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_role_request_rejects_unknown_role() {
        assert!(serde_json::from_str::<UpdateRoleRequest>(r#"{"role":"root"}"#).is_err());
        let request: UpdateRoleRequest = serde_json::from_str(r#"{"role":"chiefeditor"}"#).unwrap();
        assert_eq!(request.role, UserRole::ChiefEditor);
    }
}

use diesel::prelude::*;

use super::UserRole;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// argon2 PHC string, never the plain text
    pub password: Option<String>,
    pub role: UserRole,
}

/// NewUser model for inserting new records
/// Derives Insertable for INSERT operations
#[derive(Debug, Insertable, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: UserRole,
}

/// UpdateUser model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Clone, Default, PartialEq)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUser {
    /// Changeset touching only the role column.
    pub fn role_only(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

impl User {
    /// Applies a changeset in memory, mirroring `UPDATE ... SET` semantics
    /// where `None` leaves the column untouched.
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(username) = changes.username {
            self.username = Some(username);
        }
        if let Some(email) = changes.email {
            self.email = Some(email);
        }
        if let Some(password) = changes.password {
            self.password = Some(password);
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
    }
}

/// Listing filter accepted by the user store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring match on username
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            name: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: Some("$argon2id$hash".to_string()),
            role: UserRole::User,
        }
    }

    #[test]
    fn test_role_only_changeset() {
        let changes = UpdateUser::role_only(UserRole::Editor);
        assert_eq!(changes.role, Some(UserRole::Editor));
        assert!(changes.name.is_none());
        assert!(changes.email.is_none());
        assert!(!changes.is_empty());
        assert!(UpdateUser::default().is_empty());
    }

    #[test]
    fn test_apply_leaves_unset_fields() {
        let mut user = sample_user();
        user.apply(UpdateUser {
            name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        });

        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.username.as_deref(), Some("ada"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.id, 7);
    }
}

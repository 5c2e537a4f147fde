use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Maps Diesel failures onto `AppError` variants the API can report.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging unexpected failures with `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, info.details(), constraint_name)
                    .map(|(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    })
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message).map(|(entity, field)| {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                })
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &str,
        details: Option<&str>,
        constraint: Option<&str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                details: details.map(str::to_string),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find user");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_duplicate_email() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
            Some("Key (email)=(ada@example.com) already exists."),
            Some("users_email_key"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "ada@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_role_check_violation() {
        let error = database_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"users\" violates check constraint \"users_role_check\"",
            None,
            Some("users_role_check"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "update user") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "role");
                assert!(reason.contains("Check constraint failed"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_unknown_database_error() {
        let error = database_error(
            DatabaseErrorKind::SerializationFailure,
            "could not serialize access",
            None,
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "update user") {
            AppError::Database { operation, .. } => assert_eq!(operation, "update user"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}

use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;

/// Field-level validation failure reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Every handler returns `AppResult`; the HTTP mapping lives in
/// `api::middleware::error_handler`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Request DTO failed one or more validation rules
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Unauthorized access error with authentication message
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Forbidden access error with authorization message
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for a missing user looked up by id.
    pub fn user_not_found(id: i32) -> Self {
        AppError::NotFound {
            entity: "user".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationFieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code)),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 3))]
        username: String,
    }

    #[test]
    fn test_validation_errors_conversion_sorted_by_field() {
        let payload = Payload {
            email: "nope".to_string(),
            username: "x".to_string(),
        };
        let error = AppError::from(payload.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].message, "Invalid email format");
                assert_eq!(errors[1].field, "username");
                assert!(errors[1].message.contains("length"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_user_not_found_message() {
        let error = AppError::user_not_found(42);
        assert_eq!(error.to_string(), "Resource not found: user with id=42");
    }

    #[test]
    fn test_config_error_conversion_keeps_field() {
        let error = AppError::from(crate::config::error::ConfigError::validation(
            "jwt.secret",
            "too short",
        ));
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "jwt.secret"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}

//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "user with id=42 was not found",
    "details": {"entity": "user", "field": "id", "value": "42"}
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {}={} was not found", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {}='{}' already exists", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Validation failed for {}", field))
            .with_details(json!({ "field": field, "reason": reason }))
    }
}

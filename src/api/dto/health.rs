//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use utoipa::ToSchema;

/// Aggregated health of the service and its dependencies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00Z",
    "checks": {
        "store": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// RFC 3339 time of the check
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Worst of two statuses.
    pub fn combine(self, other: HealthStatus) -> HealthStatus {
        match (self, other) {
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        }
    }
}

/// Result of probing a single dependency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "Connected")]
    pub message: Option<String>,
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn healthy(message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some(message.into()),
            response_time_ms: Some(elapsed.as_millis() as u64),
        }
    }

    pub fn unhealthy(message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: Some(elapsed.as_millis() as u64),
        }
    }
}

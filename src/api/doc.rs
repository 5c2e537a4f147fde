use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const USER_TAG: &str = "User";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "blog-rs",
        description = "User management API of the blog backend",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::UserRole,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /users/login"))
                        .build(),
                ),
            )
        }
    }
}

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that has passed its `validator` rules.
///
/// Malformed bodies become `AppError::BadRequest`, rule violations
/// `AppError::ValidationErrors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that has passed its `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
        username: String,
        #[validate(email(message = "Invalid email format"))]
        email: Option<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, message = "Page must be at least 1"))]
        page: u32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn query_parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_json() {
        let request = json_request(r#"{"username":"ada","email":"ada@example.com"}"#);
        let ValidatedJson(signup) = ValidatedJson::<Signup>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(signup.username, "ada");
        assert_eq!(signup.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_json_validation_errors_listed_per_field() {
        let request = json_request(r#"{"username":"ab","email":"not-an-email"}"#);
        let result = ValidatedJson::<Signup>::from_request(request, &()).await;

        match result {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].message, "Invalid email format");
                assert_eq!(errors[1].field, "username");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"username": "#);
        let result = ValidatedJson::<Signup>::from_request(request, &()).await;

        match result {
            Err(AppError::BadRequest { message }) => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .body(Body::from(r#"{"username":"ada"}"#))
            .unwrap();
        let result = ValidatedJson::<Signup>::from_request(request, &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_query_validation() {
        let mut parts = query_parts("/users?page=2");
        let ValidatedQuery(paging) = ValidatedQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(paging.page, 2);

        let mut parts = query_parts("/users?page=0");
        let result = ValidatedQuery::<Paging>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::ValidationErrors { .. })));

        let mut parts = query_parts("/users?page=abc");
        let result = ValidatedQuery::<Paging>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}

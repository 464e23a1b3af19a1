//! Validation utilities for web DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::post::{validate_content, validate_poster_name};
use crate::web::error::ApiError;
use crate::PostboardError;

/// A JSON extractor that validates the request body.
///
/// Deserializes the body as JSON, then runs `validator` over it. Failures
/// become a 422 response listing the offending fields.
///
/// ```ignore
/// async fn create_post(
///     ValidatedJson(req): ValidatedJson<CreatePostRequest>,
/// ) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
///     // req is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

fn field_error(code: &'static str, err: PostboardError) -> ValidationError {
    let message = match err {
        PostboardError::Validation(msg) => msg,
        other => other.to_string(),
    };
    ValidationError::new(code).with_message(message.into())
}

/// Validate a poster name: non-blank and at most 100 characters after trimming.
pub fn valid_poster_name(value: &str) -> Result<(), ValidationError> {
    validate_poster_name(value)
        .map(|_| ())
        .map_err(|e| field_error("poster_name", e))
}

/// Validate post content: non-blank after trimming.
pub fn valid_content(value: &str) -> Result<(), ValidationError> {
    validate_content(value)
        .map(|_| ())
        .map_err(|e| field_error("content", e))
}

/// Flatten validation errors into display messages, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_poster_name() {
        assert!(valid_poster_name("Jane Smith").is_ok());
        assert!(valid_poster_name("  padded  ").is_ok());

        let err = valid_poster_name("   ").unwrap_err();
        assert_eq!(err.code, "poster_name");
        assert_eq!(
            err.message.as_deref(),
            Some("poster name must not be empty")
        );

        assert!(valid_poster_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_valid_content() {
        assert!(valid_content("Hello").is_ok());
        let err = valid_content("\n").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("content must not be empty"));
    }

    #[test]
    fn test_validation_messages_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("poster_name", field_error("poster_name", PostboardError::Validation("b".into())));
        errors.add("content", field_error("content", PostboardError::Validation("a".into())));

        assert_eq!(validation_messages(&errors), vec!["a", "b"]);
    }
}

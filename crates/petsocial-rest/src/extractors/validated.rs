//! Validated JSON extractor.
//!
//! Deserializes the body and runs `validator` rules. Both malformed JSON and
//! rule violations come back as a 400 envelope, so admin clients see one
//! error shape.

use crate::responses::{ApiResponse, AppError};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petsocial_core::validation_errors_to_error;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for validated JSON extraction.
pub enum ValidatedJsonRejection {
    /// Body was not valid JSON for the target type.
    JsonError(JsonRejection),
    /// Body parsed but broke a validation rule.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = ApiResponse::error(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid request body: {}", rejection.body_text()),
                );
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                AppError(validation_errors_to_error(errors)).into_response()
            }
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

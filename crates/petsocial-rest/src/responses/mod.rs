//! API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petsocial_core::PetsocialError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Message carried by every successful response.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Envelope wrapping every API payload.
///
/// `data` is serialized as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a 200 response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            status: true,
            status_code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a 200 response with a message and no data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    /// Creates an error response.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: false,
            status_code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub PetsocialError);

impl From<PetsocialError> for AppError {
    fn from(err: PetsocialError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        }

        let body = Json(ApiResponse::error(status, self.0.client_message()));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a success response without data.
pub fn ok_message(message: impl Into<String>) -> ApiResult<()> {
    Ok(Json(ApiResponse::message(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": true,
                "statusCode": 200,
                "message": "Success",
                "data": [1, 2]
            })
        );
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let json =
            serde_json::to_value(ApiResponse::error(StatusCode::CONFLICT, "duplicate")).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["statusCode"], 409);
        assert!(json["data"].is_null());
    }
}

//! Path and query extractors whose rejections use the response envelope.

use crate::responses::AppError;
use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    FromRequestParts,
};
use petsocial_core::PetsocialError;

/// `Path` extractor that rejects with a 400 envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `Query` extractor that rejects with a 400 envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self(PetsocialError::validation(format!(
            "Invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self(PetsocialError::validation(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}

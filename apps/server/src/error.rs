use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clankermon_core::errors::{Error as CoreError, ErrorKind, ValidationError};
use serde_json::Value;
use thiserror::Error;

use crate::models::ErrorBody;

const MISSING_PARAMETERS: &str = "Missing parameters. Please provide level and cm_type";
const QUERY_TIMEOUT: &str = "Query timeout. Please try again.";
const EVALUATION_FAILED: &str = "Failed to evaluate Clankermon";
const EVALUATION_CANCELLED: &str = "Evaluation cancelled";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Core(e) => match e.kind() {
                ErrorKind::Validation => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new(MISSING_PARAMETERS),
                ),
                ErrorKind::Timeout => (StatusCode::REQUEST_TIMEOUT, ErrorBody::new(QUERY_TIMEOUT)),
                ErrorKind::RemoteService => {
                    // Upstream payload when the service sent one, our own message otherwise
                    let details = e
                        .details()
                        .cloned()
                        .unwrap_or_else(|| Value::String(e.to_string()));
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::with_details(EVALUATION_FAILED, details),
                    )
                }
                ErrorKind::Cancelled => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody::new(EVALUATION_CANCELLED),
                ),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, ErrorBody::new(reason)),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

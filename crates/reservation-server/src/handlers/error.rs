//! Error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reservation_core::ReservationError;
use serde_json::json;

/// API error response
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl From<ReservationError> for ApiError {
    fn from(e: ReservationError) -> Self {
        let status = match e {
            ReservationError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReservationError::Validation(_) | ReservationError::NoFieldsToUpdate => {
                StatusCode::BAD_REQUEST
            }
            ReservationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Internal detail is already logged by the service
        let message = match e {
            ReservationError::Internal(_) => "internal server error".to_string(),
            ref other => other.to_string(),
        };

        ApiError {
            status,
            code: e.code(),
            message,
        }
    }
}

/// A body that is not valid JSON for the target type is a client error
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ReservationError::Validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "code": self.code
        }));
        (self.status, body).into_response()
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// API error carrying an endpoint-specific JSON body. The surface predates
/// this implementation and each endpoint has its own error shape, so the
/// body is free-form rather than a shared envelope.
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(body: Value) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body,
        }
    }

    #[must_use]
    pub fn not_found(body: Value) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body,
        }
    }

    #[must_use]
    pub fn internal(body: Value) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

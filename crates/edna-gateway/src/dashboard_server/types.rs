use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use edna_dashboard::DashboardError;
use serde_json::json;

/// JSON error envelope returned by the API routes.
#[derive(Debug)]
pub(super) struct EdnaApiError {
    pub(super) status: StatusCode,
    pub(super) code: &'static str,
    pub(super) message: String,
}

impl EdnaApiError {
    pub(super) fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub(super) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl From<DashboardError> for EdnaApiError {
    fn from(error: DashboardError) -> Self {
        let status = if error.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, error.code(), error.to_string())
    }
}

impl IntoResponse for EdnaApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": {
                    "code": self.code,
                    "message": self.message,
                }
            })),
        )
            .into_response()
    }
}

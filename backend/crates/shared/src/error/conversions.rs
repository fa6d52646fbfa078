//! Error conversions - HTTP rendering of [`AppError`]
//!
//! With the `axum` feature, an [`AppError`] is a response: an RFC 7807
//! problem-details body whose `status` matches the HTTP status.

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });
        if let Some(details) = self.details() {
            body["errors"] = details.clone();
        }

        (status, Json(body)).into_response()
    }
}

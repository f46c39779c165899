//! Error conversions
//!
//! Renders [`AppError`] as the `{code, msg, data: null}` envelope.

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::response::Envelope;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, axum::Json(Envelope::<()>::empty(self.code()))).into_response()
    }
}

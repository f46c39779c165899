//! Response Envelope
//!
//! Every endpoint answers with `{code, msg, data}`. Failures carry
//! `data: null`; see [`AppError`](crate::error::app_error::AppError).

use serde::Serialize;

use crate::error::code::Code;

/// `{code, msg, data}` レスポンスラッパー
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub code: Code,
    pub msg: &'static str,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// `SUCCESS` with a payload
    pub fn success(data: T) -> Self {
        Self {
            code: Code::Success,
            msg: Code::Success.msg(),
            data: Some(data),
        }
    }

    /// Code-only envelope (`data: null`)
    pub fn empty(code: Code) -> Self {
        Self {
            code,
            msg: code.msg(),
            data: None,
        }
    }
}

impl Envelope<()> {
    /// `SUCCESS` without a payload
    pub fn ok() -> Self {
        Self::empty(Code::Success)
    }
}

/// Paged list payload: `{lists: [...], total: N}`
#[derive(Debug, Clone, Serialize)]
pub struct ListData<T> {
    pub lists: Vec<T>,
    pub total: i64,
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        (axum::http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

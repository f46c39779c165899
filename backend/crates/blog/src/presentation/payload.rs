//! Request Body Extractor
//!
//! Write endpoints take either a JSON body or an urlencoded form, picked by
//! `Content-Type`. Anything unparseable is `INVALID_PARAMS`.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use platform::validation::Violations;
use serde::de::DeserializeOwned;

use crate::error::BlogError;

/// JSON or form body
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn rejected(detail: String) -> BlogError {
    BlogError::InvalidParams(Violations::single("body", detail))
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BlogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

//! Request body extractors shared by the form handlers.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::trace;

use crate::error::AppError;

/// A body sent either as `application/x-www-form-urlencoded` or as JSON,
/// picked by `Content-Type`. Anything that is not JSON is read as a form.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            trace!("Reading JSON body");
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;
            Ok(Self(value))
        } else {
            trace!("Reading form body");
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| rejected(rejection.status(), rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}

fn rejected(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(detail)
    } else {
        AppError::IncompleteData(detail)
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Read a field as text whether it arrives as a string or, from a JSON body,
/// as a number. Parsing into the real type happens after trimming.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

//! Request body extraction for `/echo`.
//!
//! Mirrors a permissive JSON body parser rather than axum's `Json`:
//! - a missing or non-JSON content type yields an empty object
//! - an empty body yields an empty object
//! - a top-level array becomes an object keyed by index ("0", "1", ...)
//! - anything else that is not an object or array is rejected with 400

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use thiserror::Error;

/// The parsed `/echo` body, always a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EchoBody(pub Map<String, Value>);

#[derive(Debug, Error)]
pub enum BodyRejection {
    /// Reading the body failed (including the body limit).
    #[error(transparent)]
    Read(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Valid JSON, but a scalar or `null` at the top level.
    #[error("JSON body must be an object or an array")]
    NotAContainer,
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Read(rejection) => rejection.into_response(),
            other => (StatusCode::BAD_REQUEST, other.to_string()).into_response(),
        }
    }
}

impl<S> FromRequest<S> for EchoBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(Self::default());
        }
        let bytes = Bytes::from_request(req, state).await?;
        parse_body(&bytes).map(Self)
    }
}

/// `application/json`, with or without parameters such as `charset`.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// Parse a JSON body into an object, applying the rules above.
pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, BodyRejection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect()),
        _ => Err(BodyRejection::NotAContainer),
    }
}

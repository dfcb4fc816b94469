//! Handler errors and their HTTP mapping.
//!
//! Bodies are plain text. Body-parsing failures never reach this type;
//! the `EchoBody` extractor rejects them first.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::echo::{InvokeError, MergeError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Guarded merge refused the body (400).
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The formatter could not be invoked after the merge (500).
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Merge(_) => StatusCode::BAD_REQUEST,
            ApiError::Invoke(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Merge(e) => e.to_string(),
            ApiError::Invoke(_) => "Internal Server Error".to_string(),
        };
        (self.status(), body).into_response()
    }
}

//! Request handlers.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;

use crate::echo::{EchoTarget, FORMATTER_KEY};
use crate::http::error::ApiError;
use crate::http::extract::EchoBody;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};

/// `POST /echo`
///
/// Builds a fresh [`EchoTarget`], merges the body into it with the
/// configured mode and answers with whatever its `formatter` returns.
/// A body that replaces `formatter` under the unchecked mode turns into a
/// 500.
pub async fn echo(
    State(state): State<AppState>,
    headers: HeaderMap,
    EchoBody(body): EchoBody,
) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let keys = body.len();

    let mut target = EchoTarget::with_label(state.echo.default_value.as_str());

    if let Err(e) = target.merge(body, state.echo.merge_mode) {
        let err = ApiError::from(e);
        tracing::info!(request_id = %request_id, error = %err, "Merge refused");
        metrics::record_request(Outcome::Refused, err.status().as_u16(), start);
        return Err(err);
    }

    tracing::debug!(
        request_id = %request_id,
        keys,
        merged = %target.to_value(),
        "Body merged"
    );

    match target.invoke(FORMATTER_KEY) {
        Ok(out) => {
            metrics::record_request(Outcome::Echoed, StatusCode::OK.as_u16(), start);
            Ok(Json(out))
        }
        Err(e) => {
            let err = ApiError::from(e);
            tracing::warn!(request_id = %request_id, error = %err, "Formatter not invocable");
            metrics::record_request(Outcome::Fault, err.status().as_u16(), start);
            Err(err)
        }
    }
}

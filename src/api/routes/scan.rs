use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::errors::VigilError;

#[derive(Deserialize)]
pub struct ScanRequest {
    pub source: String,
}

/// Enqueue an on-demand scan and acknowledge immediately; a worker on one
/// of the running accounts picks it up. No synchronous scan result.
pub async fn submit_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match state.queue.submit(&req.source) {
        Ok(ident) => Ok((
            StatusCode::ACCEPTED,
            Json(json!({
                "status": "queued",
                "source": ident,
            })),
        )),
        Err(VigilError::InvalidIdentifier(_)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "empty source identifier"})),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )),
    }
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;

const MESSAGE_CAP: usize = 500;

#[derive(Deserialize)]
pub struct MessagesQuery {
    pub source: Option<String>,
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .db
        .flagged_messages(query.source.as_deref(), MESSAGE_CAP)
        .map(|messages| {
            let total = messages.len();
            Json(json!({ "messages": messages, "total": total }))
        })
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))
}

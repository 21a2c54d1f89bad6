use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::models::SourceKind;

#[derive(Deserialize)]
pub struct SourcesQuery {
    pub kind: Option<String>,
    pub limit: Option<usize>,
}

/// With a limit: top sources by risk. Otherwise: all active sources,
/// optionally filtered by kind.
pub async fn list_sources(
    State(state): State<AppState>,
    Query(query): Query<SourcesQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let result = match query.limit {
        Some(limit) => state.db.top_sources(limit),
        None => state
            .db
            .sources_by_kind(query.kind.as_deref().map(SourceKind::parse)),
    };

    result
        .map(|sources| {
            let total = sources.len();
            Json(json!({ "sources": sources, "total": total }))
        })
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))
}

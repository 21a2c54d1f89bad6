pub mod routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::errors::VigilError;
use crate::queue::ScanQueue;

/// Shared state of the read-only dashboard API plus the scan-submission
/// boundary. The queue is the same one the account workers drain.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub queue: ScanQueue,
}

pub fn create_app_state(db_path: &str, queue: ScanQueue) -> Result<AppState, VigilError> {
    let db = Database::new(db_path)?;
    Ok(AppState { db, queue })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/stats", axum::routing::get(routes::stats::get_stats))
        .route("/api/sources", axum::routing::get(routes::sources::list_sources))
        .route("/api/messages", axum::routing::get(routes::messages::list_messages))
        .route("/api/scan", axum::routing::post(routes::scan::submit_scan))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

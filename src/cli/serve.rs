use std::path::Path;

use tracing::info;

use crate::api;
use crate::config::{self, VigilConfig};
use crate::errors::VigilError;
use crate::queue::ScanQueue;
use super::commands::ServeArgs;

pub async fn handle_serve(args: ServeArgs) -> Result<(), VigilError> {
    let config = match &args.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => VigilConfig::default(),
    };

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| config.database_path().to_string());

    let web = config.web.clone().unwrap_or_default();
    let addr = match (&args.host, args.port) {
        (None, None) => web.bind_addr(),
        (host, port) => format!(
            "{}:{}",
            host.as_deref().unwrap_or_else(|| web.host.as_deref().unwrap_or("0.0.0.0")),
            port.unwrap_or_else(|| web.port.unwrap_or(8000)),
        ),
    };

    let queue = ScanQueue::new();
    let state = api::create_app_state(&db_path, queue)?;
    let router = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, db = %db_path, "Dashboard API listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| VigilError::Internal(format!("Server error: {}", e)))?;
    Ok(())
}

use std::sync::Arc;

use tracing::{error, info};

use crate::platform::PlatformClient;
use crate::queue::ScanQueue;
use super::orchestrator::Monitor;

/// One worker loop per running account, all draining the shared queue.
/// Whichever worker dequeues a request first runs it; failures are logged
/// and the item is not re-queued.
pub async fn run_scan_worker<C: PlatformClient>(
    monitor: Arc<Monitor<C>>,
    queue: ScanQueue,
    limit: usize,
    account: String,
) {
    while let Some(identifier) = queue.recv().await {
        info!(account = %account, identifier = %identifier, "Manual scan request dequeued");
        let outcome = monitor.manual_scan(&identifier, limit).await;
        if outcome.ok {
            info!(
                account = %account,
                source = %outcome.title,
                scanned = outcome.scanned,
                suspicious = outcome.suspicious,
                "Manual scan request done"
            );
        } else {
            error!(
                account = %account,
                identifier = %identifier,
                error = %outcome.error.as_deref().unwrap_or("unknown"),
                "Manual scan request failed"
            );
        }
    }
    info!(account = %account, "Scan queue closed, worker stopping");
}

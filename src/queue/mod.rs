use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::errors::VigilError;

/// Strip a URL prefix and leading `@` from a submitted identifier.
/// Returns `None` when nothing usable remains.
pub fn normalize_identifier(raw: &str) -> Option<String> {
    let mut ident = raw.trim();
    if ident.starts_with("http://") || ident.starts_with("https://") {
        ident = ident.rsplit('/').next().unwrap_or(ident);
    }
    let ident = ident.trim_start_matches('@').trim();
    if ident.is_empty() {
        None
    } else {
        Some(ident.to_string())
    }
}

/// Process-wide queue of on-demand scan requests.
///
/// Many producers (the dashboard boundary), many consumers (one worker per
/// running account). Workers park on `recv` until an item arrives; the
/// single receiver behind the lock guarantees at-most-once delivery. No
/// acknowledgment, no re-queue on failure.
#[derive(Clone)]
pub struct ScanQueue {
    tx: mpsc::UnboundedSender<String>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl ScanQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Normalize and enqueue an identifier. Returns the normalized form
    /// acknowledged to the submitter.
    pub fn submit(&self, raw: &str) -> Result<String, VigilError> {
        let ident = normalize_identifier(raw)
            .ok_or_else(|| VigilError::InvalidIdentifier(raw.to_string()))?;
        self.tx
            .send(ident.clone())
            .map_err(|_| VigilError::Internal("scan queue closed".to_string()))?;
        Ok(ident)
    }

    /// Await the next request. `None` once all submitters are gone.
    pub async fn recv(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

impl Default for ScanQueue {
    fn default() -> Self {
        Self::new()
    }
}

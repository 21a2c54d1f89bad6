use serde::{Deserialize, Serialize};

/// Summary returned by a manual scan. Resolution failures are reported
/// here rather than raised, since this path answers a user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub ok: bool,
    pub identifier: String,
    pub title: String,
    pub scanned: usize,
    pub suspicious: usize,
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn failed(identifier: &str, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            identifier: identifier.to_string(),
            title: identifier.to_string(),
            scanned: 0,
            suspicious: 0,
            error: Some(error.into()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted suspicious message. Append-only; written exactly once per
/// message that classifies suspicious.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedMessage {
    pub source_handle: String,
    pub text: String,
    pub has_drug_signal: bool,
    pub has_geo_signal: bool,
    pub timestamp: DateTime<Utc>,
}

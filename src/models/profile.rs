use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a monitored source is on the platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Broadcast,
    Group,
    #[serde(other)]
    Unknown,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::Group => "group",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "broadcast" => Self::Broadcast,
            "group" => Self::Group,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk profile of one monitored source. Upserted on every analysis
/// (live hit, backlog, manual scan, discovery); last scan wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProfile {
    pub handle: Option<String>,
    pub title: String,
    pub member_count: i64,
    /// Fraction of sampled participants with an in-country phone prefix.
    pub geo_ratio: f64,
    pub risk_score: f64,
    pub discovery_method: String,
    pub description: String,
    pub kind: SourceKind,
    pub last_checked: DateTime<Utc>,
}

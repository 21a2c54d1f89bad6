use serde::{Deserialize, Serialize};

const DEFAULT_DIALOGS_LIMIT: usize = 200;
const DEFAULT_HISTORY_LIMIT: usize = 200;
const DEFAULT_MANUAL_SCAN_LIMIT: usize = 500;
const DEFAULT_PARTICIPANT_SAMPLE: usize = 10;
const DEFAULT_CONTENT_SAMPLE: usize = 15;
const DEFAULT_DISCOVERY_INTERVAL_SECS: u64 = 7200;
const DEFAULT_DISCOVERY_RETRY_SECS: u64 = 300;
const DEFAULT_BOT_SEARCH_INTERVAL_SECS: u64 = 3600;
const DEFAULT_DISCOVERY_DIALOGS_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct VigilConfig {
    /// Destination handle for suspicious-message notifications. Alerts are
    /// silently disabled when unset.
    pub alert_chat: Option<String>,
    /// SQLite database path.
    pub database: Option<String>,
    pub accounts: Vec<AccountConfig>,
    pub scan: Option<ScanConfig>,
    pub web: Option<WebConfig>,
    pub discovery: Option<DiscoveryConfig>,
}

impl VigilConfig {
    pub fn database_path(&self) -> &str {
        self.database.as_deref().unwrap_or("./data/vigil.db")
    }

    pub fn limits(&self) -> ScanLimits {
        let scan = self.scan.clone().unwrap_or_default();
        ScanLimits {
            dialogs: scan.dialogs_limit.unwrap_or(DEFAULT_DIALOGS_LIMIT),
            history: scan.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
            manual_scan: scan.manual_scan_limit.unwrap_or(DEFAULT_MANUAL_SCAN_LIMIT),
            participant_sample: scan.participant_sample.unwrap_or(DEFAULT_PARTICIPANT_SAMPLE),
            content_sample: scan.content_sample.unwrap_or(DEFAULT_CONTENT_SAMPLE),
        }
    }

    pub fn discovery_settings(&self) -> DiscoverySettings {
        let d = self.discovery.clone().unwrap_or_default();
        DiscoverySettings {
            interval_secs: d.interval_secs.unwrap_or(DEFAULT_DISCOVERY_INTERVAL_SECS),
            retry_secs: d.retry_secs.unwrap_or(DEFAULT_DISCOVERY_RETRY_SECS),
            bot_interval_secs: d.bot_interval_secs.unwrap_or(DEFAULT_BOT_SEARCH_INTERVAL_SECS),
            dialogs_limit: d.dialogs_limit.unwrap_or(DEFAULT_DISCOVERY_DIALOGS_LIMIT),
            bots: d.bots.unwrap_or_default(),
        }
    }
}

/// Credentials for one platform account session.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
    pub session: String,
    pub phone: String,
    pub api_id: Option<i64>,
    pub api_hash: Option<String>,
}

impl AccountConfig {
    /// Missing credential fields are fatal for this account only; the
    /// remaining accounts keep running.
    pub fn validate(&self) -> Result<(), String> {
        if self.session.trim().is_empty() {
            return Err("missing session".to_string());
        }
        if self.phone.trim().is_empty() {
            return Err("missing phone".to_string());
        }
        if self.api_id.is_none() {
            return Err("missing api_id".to_string());
        }
        match &self.api_hash {
            None => return Err("missing api_hash".to_string()),
            Some(h) if h.trim().is_empty() => return Err("missing api_hash".to_string()),
            Some(_) => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanConfig {
    pub dialogs_limit: Option<usize>,
    pub history_limit: Option<usize>,
    pub manual_scan_limit: Option<usize>,
    pub participant_sample: Option<usize>,
    pub content_sample: Option<usize>,
}

/// Resolved scan bounds, defaults applied once.
#[derive(Debug, Clone, Copy)]
pub struct ScanLimits {
    pub dialogs: usize,
    pub history: usize,
    pub manual_scan: usize,
    pub participant_sample: usize,
    pub content_sample: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        VigilConfig::default().limits()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WebConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl WebConfig {
    pub fn bind_addr(&self) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or("0.0.0.0"),
            self.port.unwrap_or(8000)
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DiscoveryConfig {
    pub interval_secs: Option<u64>,
    pub retry_secs: Option<u64>,
    pub bot_interval_secs: Option<u64>,
    pub dialogs_limit: Option<usize>,
    pub bots: Option<Vec<String>>,
}

/// Resolved discovery settings.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    pub interval_secs: u64,
    pub retry_secs: u64,
    pub bot_interval_secs: u64,
    pub dialogs_limit: usize,
    pub bots: Vec<String>,
}

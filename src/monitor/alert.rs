use std::sync::Arc;

use tracing::debug;

use crate::classifier::Classification;
use crate::errors::VigilError;
use crate::platform::{Entity, PlatformClient};

const EXCERPT_LIMIT: usize = 350;

/// The configured alert destination, normalized once for guard checks.
#[derive(Debug, Clone, Default)]
pub struct AlertTarget {
    handle: Option<String>,
    normalized: String,
}

impl AlertTarget {
    pub fn new(handle: Option<String>) -> Self {
        let normalized = handle
            .as_deref()
            .map(|h| h.trim_start_matches('@').to_lowercase())
            .unwrap_or_default();
        // a sigil-only destination is as good as none
        let handle = if normalized.is_empty() { None } else { handle };
        Self { handle, normalized }
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        !self.normalized.is_empty()
    }

    /// Whether an entity IS the alert destination. Case-insensitive handle
    /// comparison, leading sigil stripped; entities without a handle never
    /// match.
    pub fn matches(&self, entity: &Entity) -> bool {
        if !self.is_configured() {
            return false;
        }
        match entity.handle() {
            Some(handle) => handle.trim_start_matches('@').to_lowercase() == self.normalized,
            None => false,
        }
    }
}

/// Per-message context forwarded to the alert text.
#[derive(Debug, Clone, Default)]
pub struct MessageMeta {
    pub message_id: Option<i64>,
    pub sender_username: Option<String>,
    pub sender_name: Option<String>,
}

/// Sends one formatted notification per qualifying message. No
/// deduplication or rate limiting across repeated hits.
pub struct AlertDispatcher<C> {
    client: Arc<C>,
    target: AlertTarget,
}

impl<C: PlatformClient> AlertDispatcher<C> {
    pub fn new(client: Arc<C>, target: AlertTarget) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &AlertTarget {
        &self.target
    }

    /// No-op when no destination is configured or when the triggering
    /// source is the destination itself.
    pub async fn dispatch(
        &self,
        entity: &Entity,
        text: &str,
        classification: &Classification,
        origin: &str,
        meta: &MessageMeta,
    ) -> Result<bool, VigilError> {
        let Some(destination) = self.target.handle() else {
            return Ok(false);
        };
        if self.target.matches(entity) {
            debug!(source = %entity.source_key(), "Skipping alert for the alert destination itself");
            return Ok(false);
        }

        let body = format_alert(entity, text, classification, origin, meta);
        self.client.send_message(destination, &body).await?;
        Ok(true)
    }
}

fn format_alert(
    entity: &Entity,
    text: &str,
    classification: &Classification,
    origin: &str,
    meta: &MessageMeta,
) -> String {
    let handle_part = match entity.handle() {
        Some(h) => format!("@{}", h),
        None => "(no handle)".to_string(),
    };

    let author = meta
        .sender_username
        .as_ref()
        .map(|u| format!("@{}", u))
        .or_else(|| meta.sender_name.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let link = match (entity.handle(), meta.message_id) {
        (Some(handle), Some(id)) => format!("https://t.me/{}/{}", handle, id),
        _ => "unavailable".to_string(),
    };

    let triggers = classification.trigger_summary();
    let triggers = if triggers.is_empty() { "—".to_string() } else { triggers };

    format!(
        "🚨 *Suspicious message detected*\n\n\
         *Source:* {} {}\n\
         *Origin:* `{}`\n\
         *Author:* {}\n\
         *Link:* {}\n\
         *Risk:* {:.0}%\n\
         *Triggers:* `{}`\n\n\
         ```{}```",
        entity.title(),
        handle_part,
        origin,
        author,
        link,
        classification.risk_score * 100.0,
        triggers,
        truncate_excerpt(text, EXCERPT_LIMIT),
    )
}

/// Bounded excerpt, cut on a character boundary.
fn truncate_excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

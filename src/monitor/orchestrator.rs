use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::ScanLimits;
use crate::models::ScanOutcome;
use crate::platform::{ChatMessage, Entity, PlatformClient};
use crate::queue::normalize_identifier;
use super::alert::{AlertTarget, MessageMeta};
use super::pipeline::MessagePipeline;

/// Per-account monitor. Runs the one-time backlog scan, then consumes live
/// events for the rest of the process lifetime; manual scans reuse the same
/// message pipeline.
pub struct Monitor<C> {
    account: String,
    client: Arc<C>,
    pipeline: Arc<MessagePipeline<C>>,
    alert_target: AlertTarget,
    limits: ScanLimits,
}

impl<C: PlatformClient> Monitor<C> {
    pub fn new(
        account: impl Into<String>,
        client: Arc<C>,
        pipeline: Arc<MessagePipeline<C>>,
        alert_target: AlertTarget,
        limits: ScanLimits,
    ) -> Self {
        Self {
            account: account.into(),
            client,
            pipeline,
            alert_target,
            limits,
        }
    }

    pub fn pipeline(&self) -> &MessagePipeline<C> {
        &self.pipeline
    }

    /// Backlog scan, then the live loop. Returns when the event
    /// subscription ends (normally at process shutdown).
    pub async fn run(&self) {
        self.backlog_scan().await;
        self.run_live().await;
    }

    /// Sweep the account's dialog list once and route recent history
    /// through the pipeline. Errors on individual dialogs are logged and
    /// skipped; the live transition happens unconditionally afterwards.
    pub async fn backlog_scan(&self) {
        info!(account = %self.account, "Backlog scan started");

        let dialogs = match self.client.dialogs(self.limits.dialogs).await {
            Ok(d) => d,
            Err(e) => {
                error!(account = %self.account, error = %e, "Dialog listing failed, backlog skipped");
                return;
            }
        };

        for dialog in dialogs {
            let entity = dialog.entity;
            // Person-to-person dialogs are out of scope; the alert chat is
            // skipped so our own notifications are never re-ingested.
            if entity.is_person() || self.alert_target.matches(&entity) {
                continue;
            }

            info!(account = %self.account, source = %entity.title(), "Scanning history");
            match self.client.history(&entity, self.limits.history).await {
                Ok(messages) => {
                    for message in messages {
                        self.feed(&entity, &message, "history").await;
                    }
                }
                Err(e) => {
                    error!(account = %self.account, source = %entity.title(), error = %e, "Dialog scan error");
                }
            }
        }

        info!(account = %self.account, "Backlog scan finished");
    }

    /// Consume live events in arrival order until the subscription ends.
    pub async fn run_live(&self) {
        info!(account = %self.account, "Live monitoring started");
        while let Some(event) = self.client.next_event().await {
            if self.alert_target.matches(&event.source) {
                continue;
            }
            self.feed(&event.source, &event.message, "live").await;
        }
        info!(account = %self.account, "Live event stream ended");
    }

    async fn feed(&self, entity: &Entity, message: &ChatMessage, origin: &str) {
        let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) else {
            return;
        };
        let meta = MessageMeta {
            message_id: Some(message.id),
            sender_username: message.sender.as_ref().and_then(|s| s.username.clone()),
            sender_name: message.sender.as_ref().and_then(|s| s.display_name.clone()),
        };
        self.pipeline.process(entity, text, origin, &meta).await;
    }

    /// Scan one source on demand. Resolution failures come back as a
    /// failed outcome, not an error: this path answers a user request.
    pub async fn manual_scan(&self, identifier: &str, limit: usize) -> ScanOutcome {
        let Some(ident) = normalize_identifier(identifier) else {
            return ScanOutcome::failed(identifier, "empty identifier");
        };

        let entity = match self.client.resolve(&ident).await {
            Ok(e) => e,
            Err(e) => {
                warn!(account = %self.account, identifier = %ident, error = %e, "Manual scan: cannot resolve");
                return ScanOutcome::failed(identifier, e.to_string());
            }
        };

        if self.alert_target.matches(&entity) {
            return ScanOutcome::failed(identifier, "cannot scan the alert destination");
        }

        let title = entity.title().to_string();
        info!(account = %self.account, source = %title, limit, "Manual scan started");

        let messages = match self.client.history(&entity, limit).await {
            Ok(m) => m,
            Err(e) => {
                warn!(account = %self.account, source = %title, error = %e, "Manual scan: history fetch failed");
                return ScanOutcome::failed(identifier, e.to_string());
            }
        };

        let mut scanned = 0usize;
        let mut suspicious = 0usize;
        for message in messages {
            let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            scanned += 1;

            let classification = self.pipeline.classifier().classify(text);
            if classification.is_suspicious {
                suspicious += 1;
            }

            let meta = MessageMeta {
                message_id: Some(message.id),
                sender_username: message.sender.as_ref().and_then(|s| s.username.clone()),
                sender_name: message.sender.as_ref().and_then(|s| s.display_name.clone()),
            };
            self.pipeline
                .process_classified(&entity, text, "manual_scan", &meta, &classification)
                .await;
        }

        info!(account = %self.account, source = %title, scanned, suspicious, "Manual scan finished");

        ScanOutcome {
            ok: true,
            identifier: identifier.to_string(),
            title,
            scanned,
            suspicious,
            error: None,
        }
    }
}

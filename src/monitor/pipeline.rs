use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::classifier::{Classification, Classifier};
use crate::db::Database;
use crate::models::FlaggedMessage;
use crate::platform::{Entity, PlatformClient};
use super::aggregator::ChannelRiskAggregator;
use super::alert::{AlertDispatcher, MessageMeta};

/// What the pipeline did for one message. Step failures are recorded, not
/// propagated, so one bad write never stops the enclosing scan loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOutcome {
    pub suspicious: bool,
    pub persisted: bool,
    pub profiled: bool,
    pub alerted: bool,
}

/// The shared per-message path used by the backlog scan, the live handler
/// and manual scans: classify, persist the hit, refresh the source profile,
/// dispatch the alert.
pub struct MessagePipeline<C> {
    classifier: Arc<Classifier>,
    db: Database,
    aggregator: ChannelRiskAggregator<C>,
    alerts: AlertDispatcher<C>,
}

impl<C: PlatformClient> MessagePipeline<C> {
    pub fn new(
        classifier: Arc<Classifier>,
        db: Database,
        aggregator: ChannelRiskAggregator<C>,
        alerts: AlertDispatcher<C>,
    ) -> Self {
        Self {
            classifier,
            db,
            aggregator,
            alerts,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn alerts(&self) -> &AlertDispatcher<C> {
        &self.alerts
    }

    pub async fn process(
        &self,
        entity: &Entity,
        text: &str,
        origin: &str,
        meta: &MessageMeta,
    ) -> PipelineOutcome {
        if text.is_empty() {
            return PipelineOutcome::default();
        }
        let classification = self.classifier.classify(text);
        self.process_classified(entity, text, origin, meta, &classification)
            .await
    }

    /// Variant for callers that already classified the text (manual scans
    /// count suspicious hits before feeding the pipeline).
    pub async fn process_classified(
        &self,
        entity: &Entity,
        text: &str,
        origin: &str,
        meta: &MessageMeta,
        classification: &Classification,
    ) -> PipelineOutcome {
        let mut outcome = PipelineOutcome::default();
        if text.is_empty() || !classification.is_suspicious {
            return outcome;
        }
        outcome.suspicious = true;

        let source_key = entity.source_key();
        info!(
            source = %source_key,
            origin,
            excerpt = %text.chars().take(120).collect::<String>().replace('\n', " "),
            "Suspicious message"
        );

        // Each step fails independently; a lost write must not cost the
        // profile refresh or the alert.
        let flagged = FlaggedMessage {
            source_handle: source_key.clone(),
            text: text.to_string(),
            has_drug_signal: classification.has_drug_signal,
            has_geo_signal: classification.has_geo_signal,
            timestamp: Utc::now(),
        };
        match self.db.insert_flagged_message(&flagged) {
            Ok(()) => outcome.persisted = true,
            Err(e) => error!(source = %source_key, error = %e, "Failed to save flagged message"),
        }

        match self.aggregator.refresh(entity, origin).await {
            Ok(_) => outcome.profiled = true,
            Err(e) => error!(source = %source_key, error = %e, "Failed to refresh source profile"),
        }

        match self.alerts.dispatch(entity, text, classification, origin, meta).await {
            Ok(sent) => outcome.alerted = sent,
            Err(e) => error!(source = %source_key, error = %e, "Failed to send alert"),
        }

        outcome
    }
}

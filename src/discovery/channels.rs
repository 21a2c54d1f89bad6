use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use crate::classifier::Classifier;
use crate::config::DiscoverySettings;
use crate::db::Database;
use crate::errors::VigilError;
use crate::models::SourceProfile;
use crate::platform::{Entity, PlatformClient};

/// Minimum title/description score below which a discovered source is not
/// worth persisting.
const DISCOVERY_THRESHOLD: f64 = 0.1;

/// Periodic sweep over the account's dialogs scoring titles and
/// descriptions. Unlike the message pipeline, discovery only persists
/// sources that score above the threshold.
pub struct ChannelDiscoverer<C> {
    client: Arc<C>,
    classifier: Arc<Classifier>,
    db: Database,
    settings: DiscoverySettings,
}

impl<C: PlatformClient> ChannelDiscoverer<C> {
    pub fn new(
        client: Arc<C>,
        classifier: Arc<Classifier>,
        db: Database,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            client,
            classifier,
            db,
            settings,
        }
    }

    /// One discovery pass. Returns how many sources were saved.
    pub async fn discover(&self) -> Result<usize, VigilError> {
        info!("Channel discovery started");
        let mut found = 0usize;

        let dialogs = self.client.dialogs(self.settings.dialogs_limit).await?;

        for dialog in dialogs {
            let entity = dialog.entity;
            if entity.is_person() {
                continue;
            }
            let Some(profile) = self.score(&entity).await else {
                continue;
            };
            match self.db.upsert_profile(&profile) {
                Ok(()) => {
                    found += 1;
                    info!(source = %profile.title, risk = format!("{:.2}", profile.risk_score), "Discovered source");
                }
                Err(e) => error!(source = %profile.title, error = %e, "Failed to save discovered source"),
            }
        }

        info!(found, "Channel discovery finished");
        Ok(found)
    }

    /// Score title (+0.4) and description (+0.3); below the threshold the
    /// source is skipped entirely.
    async fn score(&self, entity: &Entity) -> Option<SourceProfile> {
        let entity = match self.client.entity_info(entity).await {
            Ok(fresh) => fresh,
            Err(_) => return None,
        };

        let mut risk = 0.0;
        if self.classifier.classify(entity.title()).is_suspicious {
            risk += 0.4;
        }
        if self.classifier.classify(entity.description()).is_suspicious {
            risk += 0.3;
        }

        if risk < DISCOVERY_THRESHOLD {
            return None;
        }

        Some(SourceProfile {
            handle: Some(entity.source_key()),
            title: entity.title().to_string(),
            member_count: entity.member_count(),
            geo_ratio: 0.0,
            risk_score: risk,
            discovery_method: "auto_discovery".to_string(),
            description: entity.description().to_string(),
            kind: entity.kind(),
            last_checked: Utc::now(),
        })
    }

    /// Run forever: a pass every interval, short back-off after a failed
    /// pass.
    pub async fn run_periodic(&self) {
        loop {
            let sleep_secs = match self.discover().await {
                Ok(_) => self.settings.interval_secs,
                Err(e) => {
                    error!(error = %e, "Discovery pass failed");
                    self.settings.retry_secs
                }
            };
            tokio::time::sleep(Duration::from_secs(sleep_secs)).await;
        }
    }
}

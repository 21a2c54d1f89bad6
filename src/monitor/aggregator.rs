use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::classifier::keywords::GEO_PHONE_PREFIXES;
use crate::classifier::Classifier;
use crate::config::ScanLimits;
use crate::db::Database;
use crate::errors::VigilError;
use crate::models::SourceProfile;
use crate::platform::{Entity, PlatformClient};

/// Samples a source's participants and recent messages to produce its risk
/// profile. The profile is upserted on every refresh, even at zero risk,
/// so the dashboard reflects everything that was scanned.
pub struct ChannelRiskAggregator<C> {
    client: Arc<C>,
    classifier: Arc<Classifier>,
    db: Database,
    participant_sample: usize,
    content_sample: usize,
}

impl<C: PlatformClient> ChannelRiskAggregator<C> {
    pub fn new(client: Arc<C>, classifier: Arc<Classifier>, db: Database, limits: &ScanLimits) -> Self {
        Self {
            client,
            classifier,
            db,
            participant_sample: limits.participant_sample,
            content_sample: limits.content_sample,
        }
    }

    /// Refresh and persist the profile for a source. Partial data is
    /// preferred over no profile: any fetch failure degrades its metric to
    /// zero instead of aborting.
    pub async fn refresh(
        &self,
        entity: &Entity,
        discovery_method: &str,
    ) -> Result<SourceProfile, VigilError> {
        // Event entities can carry stale metadata; prefer a fresh fetch.
        let entity = match self.client.entity_info(entity).await {
            Ok(fresh) => fresh,
            Err(e) => {
                debug!(source = %entity.source_key(), error = %e, "Metadata refresh failed, using known entity");
                entity.clone()
            }
        };

        let geo_ratio = self.geo_ratio(&entity).await;
        let risk_score = self.content_risk(&entity).await;

        let profile = SourceProfile {
            handle: Some(entity.source_key()),
            title: entity.title().to_string(),
            member_count: entity.member_count(),
            geo_ratio,
            risk_score,
            discovery_method: discovery_method.to_string(),
            description: entity.description().to_string(),
            kind: entity.kind(),
            last_checked: Utc::now(),
        };

        self.db.upsert_profile(&profile)?;
        debug!(
            source = %profile.handle.as_deref().unwrap_or("?"),
            risk = format!("{:.2}", risk_score),
            geo = format!("{:.2}", geo_ratio),
            via = discovery_method,
            "Source profile saved"
        );

        Ok(profile)
    }

    /// Fraction of sampled participants with an in-country phone prefix,
    /// over those with any phone visible. Denied listings yield 0.0.
    async fn geo_ratio(&self, entity: &Entity) -> f64 {
        let participants = match self.client.participants(entity, self.participant_sample).await {
            Ok(p) => p,
            Err(e) => {
                debug!(source = %entity.source_key(), error = %e, "Participant listing unavailable");
                return 0.0;
            }
        };

        let mut with_phone = 0usize;
        let mut local = 0usize;
        for participant in &participants {
            let Some(phone) = participant.phone.as_deref() else {
                continue;
            };
            with_phone += 1;
            if GEO_PHONE_PREFIXES.iter().any(|p| phone.starts_with(p)) {
                local += 1;
            }
        }

        if with_phone > 0 {
            local as f64 / with_phone as f64
        } else {
            0.0
        }
    }

    /// Share of suspicious messages in the recent window, clamped to [0,1].
    async fn content_risk(&self, entity: &Entity) -> f64 {
        let messages = match self.client.history(entity, self.content_sample).await {
            Ok(m) => m,
            Err(e) => {
                warn!(source = %entity.source_key(), error = %e, "Content sample unavailable");
                return 0.0;
            }
        };

        let mut with_text = 0usize;
        let mut suspicious = 0usize;
        for message in &messages {
            let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            with_text += 1;
            if self.classifier.classify(text).is_suspicious {
                suspicious += 1;
            }
        }

        if with_text > 0 {
            (suspicious as f64 / with_text as f64).min(1.0)
        } else {
            0.0
        }
    }
}

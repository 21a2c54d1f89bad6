use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::monitor::alert::MessageMeta;
use crate::monitor::pipeline::MessagePipeline;
use crate::platform::PlatformClient;

const BOT_REPLY_SAMPLE: usize = 5;
const CANDIDATE_MESSAGE_SAMPLE: usize = 10;
const BOT_QUERY_PAUSE: Duration = Duration::from_secs(3);

/// Probes a configured list of directory bots for channel references and
/// feeds each candidate's recent messages through the shared pipeline.
pub struct BotSearcher<C> {
    client: Arc<C>,
    classifier: Arc<Classifier>,
    pipeline: Arc<MessagePipeline<C>>,
    bots: Vec<String>,
    interval: Duration,
}

impl<C: PlatformClient> BotSearcher<C> {
    pub fn new(
        client: Arc<C>,
        classifier: Arc<Classifier>,
        pipeline: Arc<MessagePipeline<C>>,
        bots: Vec<String>,
        interval_secs: u64,
    ) -> Self {
        Self {
            client,
            classifier,
            pipeline,
            bots,
            interval: Duration::from_secs(interval_secs),
        }
    }

    pub async fn probe_all(&self) {
        if self.bots.is_empty() {
            return;
        }
        info!(bots = self.bots.len(), "Bot probe started");
        for bot in &self.bots {
            self.probe_bot(bot).await;
            tokio::time::sleep(BOT_QUERY_PAUSE).await;
        }
    }

    /// Poke one bot and chase any channel links in its replies. Every
    /// failure along the way skips to the next candidate.
    async fn probe_bot(&self, bot: &str) {
        if self.client.send_message(bot, "/start").await.is_err() {
            debug!(bot, "Bot unreachable");
            return;
        }

        let Ok(bot_entity) = self.client.resolve(bot).await else {
            return;
        };
        let Ok(replies) = self.client.history(&bot_entity, BOT_REPLY_SAMPLE).await else {
            return;
        };

        for reply in replies {
            let Some(text) = reply.text.as_deref() else {
                continue;
            };
            for link in self.classifier.extract_links(text) {
                let candidate = link.trim_start_matches("t.me/").trim_start_matches('@');
                if candidate.is_empty() {
                    continue;
                }
                info!(bot, candidate, "Bot suggested a channel");
                self.inspect_candidate(bot, candidate).await;
            }
        }
    }

    async fn inspect_candidate(&self, bot: &str, candidate: &str) {
        let Ok(entity) = self.client.resolve(candidate).await else {
            return;
        };
        let Ok(messages) = self.client.history(&entity, CANDIDATE_MESSAGE_SAMPLE).await else {
            return;
        };

        let origin = format!("bot_{}", bot);
        for message in messages {
            let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            self.pipeline
                .process(&entity, text, &origin, &MessageMeta::default())
                .await;
        }
    }

    pub async fn run_periodic(&self) {
        loop {
            self.probe_all().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}

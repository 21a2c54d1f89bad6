use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::classifier::Classifier;
use crate::config::VigilConfig;
use crate::db::Database;
use crate::discovery::{BotSearcher, ChannelDiscoverer};
use crate::platform::PlatformClient;
use crate::queue::ScanQueue;
use super::aggregator::ChannelRiskAggregator;
use super::alert::{AlertDispatcher, AlertTarget};
use super::orchestrator::Monitor;
use super::pipeline::MessagePipeline;
use super::worker::run_scan_worker;

/// One authenticated account and every task around it: the
/// backlog-then-live monitor, periodic discovery, periodic bot probing and
/// a shared-queue scan worker. Accounts share one database, classifier and
/// queue; their tasks are otherwise independent.
pub struct AccountRunner<C> {
    label: String,
    monitor: Arc<Monitor<C>>,
    discoverer: Arc<ChannelDiscoverer<C>>,
    searcher: Arc<BotSearcher<C>>,
    queue: ScanQueue,
    manual_scan_limit: usize,
}

impl<C: PlatformClient + 'static> AccountRunner<C> {
    pub fn new(
        label: impl Into<String>,
        client: Arc<C>,
        classifier: Arc<Classifier>,
        db: Database,
        queue: ScanQueue,
        config: &VigilConfig,
    ) -> Self {
        let label = label.into();
        let limits = config.limits();
        let discovery = config.discovery_settings();
        let alert_target = AlertTarget::new(config.alert_chat.clone());

        let aggregator =
            ChannelRiskAggregator::new(client.clone(), classifier.clone(), db.clone(), &limits);
        let alerts = AlertDispatcher::new(client.clone(), alert_target.clone());
        let pipeline = Arc::new(MessagePipeline::new(
            classifier.clone(),
            db.clone(),
            aggregator,
            alerts,
        ));

        let monitor = Arc::new(Monitor::new(
            label.clone(),
            client.clone(),
            pipeline.clone(),
            alert_target,
            limits,
        ));
        let discoverer = Arc::new(ChannelDiscoverer::new(
            client.clone(),
            classifier.clone(),
            db,
            discovery.clone(),
        ));
        let searcher = Arc::new(BotSearcher::new(
            client,
            classifier,
            pipeline,
            discovery.bots,
            discovery.bot_interval_secs,
        ));

        Self {
            label,
            monitor,
            discoverer,
            searcher,
            queue,
            manual_scan_limit: limits.manual_scan,
        }
    }

    pub fn monitor(&self) -> Arc<Monitor<C>> {
        self.monitor.clone()
    }

    /// Spawn every task for this account. The first handle is the
    /// monitor itself (backlog scan then live loop).
    pub fn spawn_all(&self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        let monitor = self.monitor.clone();
        handles.push(tokio::spawn(async move { monitor.run().await }));

        let discoverer = self.discoverer.clone();
        handles.push(tokio::spawn(async move { discoverer.run_periodic().await }));

        let searcher = self.searcher.clone();
        handles.push(tokio::spawn(async move { searcher.run_periodic().await }));

        let worker_monitor = self.monitor.clone();
        let queue = self.queue.clone();
        let limit = self.manual_scan_limit;
        let label = self.label.clone();
        handles.push(tokio::spawn(async move {
            run_scan_worker(worker_monitor, queue, limit, label).await
        }));

        info!(account = %self.label, "Account tasks started");
        handles
    }
}

/// Await every spawned account task. Returns only when all of them end,
/// which normally means process shutdown.
pub async fn join_account_tasks(handles: Vec<JoinHandle<()>>) {
    let results = futures::future::join_all(handles).await;
    for result in results {
        if let Err(e) = result {
            tracing::error!(error = %e, "Account task panicked");
        }
    }
}

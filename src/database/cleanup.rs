use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, info, instrument, warn};

use super::{DatabaseError, MemoryStore};

/// Observation lifecycle management
pub struct RetentionService {
    store: Arc<MemoryStore>,
    retention: ChronoDuration,
    cleanup_interval: Duration,
}

impl RetentionService {
    pub fn new(store: Arc<MemoryStore>, retention_hours: i64, cleanup_interval: Duration) -> Self {
        Self {
            store,
            retention: ChronoDuration::hours(retention_hours),
            cleanup_interval,
        }
    }

    /// Prunes everything older than the retention horizon measured from `now`
    pub fn prune_once(&self, now: DateTime<Utc>) -> Result<usize, DatabaseError> {
        self.store.prune_before(now - self.retention)
    }

    /// Runs until a shutdown signal arrives
    #[instrument(skip_all)]
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), DatabaseError> {
        info!(
            "🧹 Retention service starting: keeping {}h of observations, sweeping every {}s",
            self.retention.num_hours(),
            self.cleanup_interval.as_secs()
        );

        let mut cleanup_timer = interval(self.cleanup_interval);

        loop {
            tokio::select! {
                _ = cleanup_timer.tick() => {
                    match self.prune_once(Utc::now()) {
                        Ok(0) => debug!("Retention sweep found nothing to prune"),
                        Ok(removed) => info!("🗑️ Retention sweep pruned {} observations", removed),
                        Err(e) => warn!("Retention sweep failed: {}", e),
                    }
                }
                _ = shutdown.recv() => {
                    info!("🛑 Retention service shutting down");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenObservation;
    use crate::database::ObservationSource;

    fn observation(age_hours: i64, now: DateTime<Utc>) -> TokenObservation {
        TokenObservation {
            policy_id: "SNEK".to_string(),
            price: 1.0,
            volume: 1.0,
            timestamp: now - ChronoDuration::hours(age_hours),
        }
    }

    #[test]
    fn test_prune_once_respects_retention() {
        let now = Utc::now();
        let store = Arc::new(MemoryStore::new());
        store.insert_token_observation(observation(72, now));
        store.insert_token_observation(observation(30, now));
        store.insert_token_observation(observation(1, now));

        let service = RetentionService::new(Arc::clone(&store), 48, Duration::from_secs(60));
        assert_eq!(service.prune_once(now).unwrap(), 1);
        assert_eq!(store.count_observations("SNEK").unwrap(), 2);
    }

    #[test]
    fn test_pruned_store_leaves_input_snapshot_intact() {
        use crate::config::StoreConfig;
        use crate::database::ObservationSnapshot;

        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            snapshot_path: Some(dir.path().join("observations.json")),
            save_path: Some(dir.path().join("observations.saved.json")),
            ..StoreConfig::default()
        };
        let input = config.snapshot_path.as_ref().unwrap();
        let output = config.save_path.as_ref().unwrap();

        let now = Utc::now();
        let seeded = ObservationSnapshot {
            token_metrics: (0..1440)
                .map(|i| TokenObservation {
                    policy_id: "SNEK".to_string(),
                    price: 1.0,
                    volume: 1.0,
                    timestamp: now - ChronoDuration::days(3) + ChronoDuration::minutes(i),
                })
                .collect(),
            social_metrics: Vec::new(),
        };
        seeded.save_to_file(input).unwrap();

        let store = Arc::new(MemoryStore::load_snapshot(input).unwrap());
        let service = RetentionService::new(
            Arc::clone(&store),
            config.retention_hours,
            Duration::from_secs(config.cleanup_interval_secs),
        );
        assert_eq!(service.prune_once(now).unwrap(), 1440);
        store.save_snapshot(output).unwrap();

        let reloaded = MemoryStore::load_snapshot(input).unwrap();
        assert_eq!(reloaded.count_observations("SNEK").unwrap(), 1440);
        let saved = MemoryStore::load_snapshot(output).unwrap();
        assert_eq!(saved.count_observations("SNEK").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let now = Utc::now();
        let store = Arc::new(MemoryStore::new());
        store.insert_token_observation(observation(100, now));

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let service = RetentionService::new(Arc::clone(&store), 24, Duration::from_millis(10));
        let handle = tokio::spawn(service.run(shutdown_rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(()).unwrap();

        handle.await.unwrap().unwrap();
        assert_eq!(store.count_observations("SNEK").unwrap(), 0);
    }
}

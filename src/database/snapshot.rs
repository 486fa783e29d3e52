/// JSON snapshots of the observation store

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DatabaseError, MemoryStore};
use crate::core::{SocialObservation, TokenObservation};

/// On-disk layout mirroring the collector's two collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSnapshot {
    #[serde(default)]
    pub token_metrics: Vec<TokenObservation>,
    #[serde(default)]
    pub social_metrics: Vec<SocialObservation>,
}

impl ObservationSnapshot {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DatabaseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl MemoryStore {
    pub fn from_snapshot(snapshot: ObservationSnapshot) -> Result<Self, DatabaseError> {
        let store = MemoryStore::new();
        for observation in snapshot.token_metrics {
            store.insert_token_observation(observation);
        }
        for observation in snapshot.social_metrics {
            store.insert_social_observation(observation)?;
        }
        Ok(store)
    }

    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let snapshot = ObservationSnapshot::load_from_file(path)?;
        info!(
            "📂 Loaded snapshot {} ({} token, {} social observations)",
            path.display(),
            snapshot.token_metrics.len(),
            snapshot.social_metrics.len()
        );
        Self::from_snapshot(snapshot)
    }

    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), DatabaseError> {
        let path = path.as_ref();
        let snapshot = self.snapshot()?;
        snapshot.save_to_file(path)?;
        info!(
            "💾 Saved snapshot {} ({} token, {} social observations)",
            path.display(),
            snapshot.token_metrics.len(),
            snapshot.social_metrics.len()
        );
        Ok(())
    }

    /// Current contents as a snapshot; tokens in id order
    pub fn snapshot(&self) -> Result<ObservationSnapshot, DatabaseError> {
        let mut token_metrics = Vec::new();
        for token_id in self.token_ids() {
            if let Some(series) = self.token_metrics_for(&token_id) {
                token_metrics.extend(series);
            }
        }
        let social_metrics = self.social_metrics_all()?;
        Ok(ObservationSnapshot {
            token_metrics,
            social_metrics,
        })
    }
}

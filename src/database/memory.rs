/// In-memory observation store shared between the API and background tasks

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::{DatabaseError, ObservationSource};
use crate::core::{SocialObservation, TokenObservation};

/// Token series keyed by policy id plus one global social stream, all kept in timestamp order
#[derive(Debug, Default)]
pub struct MemoryStore {
    token_metrics: DashMap<String, Vec<TokenObservation>>,
    social_metrics: RwLock<Vec<SocialObservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_token_observation(&self, observation: TokenObservation) {
        let mut series = self
            .token_metrics
            .entry(observation.policy_id.clone())
            .or_default();
        let position = series.partition_point(|o| o.timestamp <= observation.timestamp);
        series.insert(position, observation);
    }

    pub fn insert_social_observation(
        &self,
        observation: SocialObservation,
    ) -> Result<(), DatabaseError> {
        let mut social = self
            .social_metrics
            .write()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        let position = social.partition_point(|o| o.timestamp <= observation.timestamp);
        social.insert(position, observation);
        Ok(())
    }

    pub fn token_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.token_metrics.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub(crate) fn token_metrics_for(&self, token_id: &str) -> Option<Vec<TokenObservation>> {
        self.token_metrics.get(token_id).map(|series| series.value().clone())
    }

    pub(crate) fn social_metrics_all(&self) -> Result<Vec<SocialObservation>, DatabaseError> {
        let social = self
            .social_metrics
            .read()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        Ok(social.to_vec())
    }

    pub fn social_len(&self) -> Result<usize, DatabaseError> {
        let social = self
            .social_metrics
            .read()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        Ok(social.len())
    }

    /// Drops observations older than `cutoff`, returning how many were removed
    pub fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DatabaseError> {
        let mut removed = 0;

        for mut entry in self.token_metrics.iter_mut() {
            let stale = entry.value().partition_point(|o| o.timestamp < cutoff);
            entry.value_mut().drain(..stale);
            removed += stale;
        }
        self.token_metrics.retain(|_, series| !series.is_empty());

        let mut social = self
            .social_metrics
            .write()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        let stale = social.partition_point(|o| o.timestamp < cutoff);
        social.drain(..stale);
        removed += stale;

        debug!("Pruned {} observations older than {}", removed, cutoff);
        Ok(removed)
    }
}

impl ObservationSource for MemoryStore {
    fn count_observations(&self, token_id: &str) -> Result<usize, DatabaseError> {
        Ok(self
            .token_metrics
            .get(token_id)
            .map_or(0, |series| series.len()))
    }

    fn fetch_price_observations(
        &self,
        token_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<TokenObservation>, DatabaseError> {
        Ok(self
            .token_metrics
            .get(token_id)
            .map(|series| {
                let start = series.partition_point(|o| o.timestamp < since);
                series[start..].to_vec()
            })
            .unwrap_or_default())
    }

    fn fetch_social_observations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SocialObservation>, DatabaseError> {
        let social = self
            .social_metrics
            .read()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        let start = social.partition_point(|o| o.timestamp < since);
        Ok(social[start..].to_vec())
    }

    fn latest_price_observations(
        &self,
        token_id: &str,
        limit: usize,
    ) -> Result<Vec<TokenObservation>, DatabaseError> {
        Ok(self
            .token_metrics
            .get(token_id)
            .map(|series| series[series.len().saturating_sub(limit)..].to_vec())
            .unwrap_or_default())
    }

    fn latest_social_observations(
        &self,
        limit: usize,
    ) -> Result<Vec<SocialObservation>, DatabaseError> {
        let social = self
            .social_metrics
            .read()
            .map_err(|e| DatabaseError::LockPoisoned(e.to_string()))?;
        Ok(social[social.len().saturating_sub(limit)..].to_vec())
    }
}

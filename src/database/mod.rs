use chrono::{DateTime, Utc};

use crate::core::{SocialObservation, TokenObservation};

pub mod memory;
pub mod snapshot;
pub mod cleanup;

pub use memory::*;
pub use snapshot::*;
pub use cleanup::*;

/// Read side of the observation store consumed by the analyzer.
///
/// Fetches return observations ordered by ascending timestamp.
pub trait ObservationSource: Send + Sync {
    /// All-time number of token observations, used to pick live vs. mock data
    fn count_observations(&self, token_id: &str) -> Result<usize, DatabaseError>;

    fn fetch_price_observations(
        &self,
        token_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<TokenObservation>, DatabaseError>;

    fn fetch_social_observations(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SocialObservation>, DatabaseError>;

    /// The newest `limit` observations for a token, regardless of age
    fn latest_price_observations(
        &self,
        token_id: &str,
        limit: usize,
    ) -> Result<Vec<TokenObservation>, DatabaseError>;

    fn latest_social_observations(
        &self,
        limit: usize,
    ) -> Result<Vec<SocialObservation>, DatabaseError>;
}

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("Query execution failed: {0}")]
    QueryError(String),

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

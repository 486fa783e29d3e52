//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{SocialObservation, TokenObservation};

/// One charted point of a token's raw history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
}

impl From<TokenObservation> for HistoryPoint {
    fn from(observation: TokenObservation) -> Self {
        Self {
            timestamp: observation.timestamp,
            price: observation.price,
            volume: observation.volume,
        }
    }
}

/// Social hype point overlaid on the price chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPoint {
    pub timestamp: DateTime<Utc>,
    pub hype_score: u64,
}

impl From<SocialObservation> for SocialPoint {
    fn from(observation: SocialObservation) -> Self {
        Self {
            timestamp: observation.timestamp,
            hype_score: observation.hype_score,
        }
    }
}

/// Response for token history; both lists run oldest to newest
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub token_id: String,
    pub history: Vec<HistoryPoint>,
    pub social_latest: Vec<SocialPoint>,
}

/// Error body for non-meter endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

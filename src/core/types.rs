/// Observation, series and result types shared across the hype meter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{CLOWN_ENERGY_MESSAGE, NEUTRAL_MESSAGE, WHALE_ACCUMULATION_MESSAGE};
use super::error::SignalError;

/// One price/supply sample for a token, as written by the ingestion collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenObservation {
    pub policy_id: String,
    pub price: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

/// Count of social posts matching the tracked keywords within one polling interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialObservation {
    pub keywords: Vec<String>,
    pub hype_score: u64,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignedRow {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub hype_score: f64,
    pub price_norm: f64,
    pub hype_norm: f64,
}

impl AlignedRow {
    pub fn new(timestamp: DateTime<Utc>, price: f64, hype_score: f64) -> Self {
        Self {
            timestamp,
            price,
            hype_score,
            price_norm: 0.0,
            hype_norm: 0.0,
        }
    }
}

/// Per-minute joined series, ordered oldest to newest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedSeries {
    rows: Vec<AlignedRow>,
}

impl AlignedSeries {
    pub fn new(rows: Vec<AlignedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [AlignedRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.price).collect()
    }

    pub fn hype_scores(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.hype_score).collect()
    }

    /// The most recent `count` rows (all rows when the series is shorter)
    pub fn trailing(&self, count: usize) -> &[AlignedRow] {
        let start = self.rows.len().saturating_sub(count);
        &self.rows[start..]
    }

    /// True when every row sits exactly one bin after its predecessor
    #[cfg(test)]
    pub(crate) fn is_minute_contiguous(&self) -> bool {
        self.rows
            .windows(2)
            .all(|pair| pair[1].timestamp - pair[0].timestamp == chrono::Duration::minutes(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Clown Energy")]
    ClownEnergy,
    #[serde(rename = "Whale Accumulation")]
    WhaleAccumulation,
    #[serde(rename = "Neutral")]
    Neutral,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::ClownEnergy => "Clown Energy",
            RiskLabel::WhaleAccumulation => "Whale Accumulation",
            RiskLabel::Neutral => "Neutral",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::ClownEnergy => CLOWN_ENERGY_MESSAGE,
            RiskLabel::WhaleAccumulation => WHALE_ACCUMULATION_MESSAGE,
            RiskLabel::Neutral => NEUTRAL_MESSAGE,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an analyzed series came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Live,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalDetails {
    pub avg_price_norm: f64,
    pub avg_hype_norm: f64,
    pub data_points: usize,
}

/// Successful meter reading for one token
#[derive(Debug, Clone, PartialEq)]
pub struct HypeSignal {
    pub ratio: f64,
    pub risk_label: RiskLabel,
    pub details: SignalDetails,
    pub origin: DataOrigin,
}

impl HypeSignal {
    pub fn message(&self) -> &'static str {
        self.risk_label.message()
    }
}

/// JSON shape returned to meter consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MeterResponse {
    Success {
        ratio: f64,
        risk_label: RiskLabel,
        message: String,
        details: SignalDetails,
    },
    Error {
        message: String,
    },
}

impl MeterResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, MeterResponse::Success { .. })
    }
}

impl From<&HypeSignal> for MeterResponse {
    fn from(signal: &HypeSignal) -> Self {
        MeterResponse::Success {
            ratio: signal.ratio,
            risk_label: signal.risk_label,
            message: signal.message().to_string(),
            details: signal.details,
        }
    }
}

impl From<&SignalError> for MeterResponse {
    fn from(error: &SignalError) -> Self {
        MeterResponse::Error {
            message: error.to_string(),
        }
    }
}

impl From<&Result<HypeSignal, SignalError>> for MeterResponse {
    fn from(outcome: &Result<HypeSignal, SignalError>) -> Self {
        match outcome {
            Ok(signal) => signal.into(),
            Err(error) => error.into(),
        }
    }
}

/// Synthetic 24h profiles for tokens without stored observations

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AlignedRow, AlignedSeries, RiskLabel, MOCK_SERIES_LEN, TRAILING_WINDOW_ROWS};
use crate::util::time_series::floor_to_minute;

const CLOWN_PRICE_FLOOR: f64 = 10.0;
const CLOWN_PRICE_CEILING: f64 = 10.2;
/// Final-hour clown price stays in the bottom tenth of the band
const CLOWN_SPIKE_PRICE_CEILING: f64 = 10.02;
const CLOWN_MAX_HYPE: u64 = 100;

const WHALE_PRICE_START: f64 = 10.0;
const WHALE_PRICE_END: f64 = 15.0;
const WHALE_MAX_HYPE: u64 = 5;

const NEUTRAL_PRICE_START: f64 = 10.0;
const NEUTRAL_PRICE_END: f64 = 11.0;
const NEUTRAL_MAX_HYPE: u64 = 20;
const NEUTRAL_LATE_MIN_HYPE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    /// Flat price, random chatter ending in a maxed-out spike
    Clown,
    /// Steady climb with near-silent social activity
    Whale,
    /// Gentle climb with moderate chatter
    Neutral,
}

impl Archetype {
    pub fn from_seed(seed: u64) -> Self {
        match seed % 3 {
            0 => Archetype::Clown,
            1 => Archetype::Whale,
            _ => Archetype::Neutral,
        }
    }

    /// Label the classifier assigns to this profile
    pub fn expected_label(&self) -> RiskLabel {
        match self {
            Archetype::Clown => RiskLabel::ClownEnergy,
            Archetype::Whale => RiskLabel::WhaleAccumulation,
            Archetype::Neutral => RiskLabel::Neutral,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Archetype::Clown => write!(f, "clown"),
            Archetype::Whale => write!(f, "whale"),
            Archetype::Neutral => write!(f, "neutral"),
        }
    }
}

/// Sum of the identifier's character codes
pub fn identifier_seed(token_id: &str) -> u64 {
    token_id.chars().map(|c| u64::from(u32::from(c))).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockProfile {
    pub seed: u64,
    pub archetype: Archetype,
    pub series: AlignedSeries,
}

/// Builds per-minute mock series ending at the current minute
#[derive(Debug, Clone)]
pub struct MockProfileGenerator {
    samples: usize,
    late_rows: usize,
}

impl Default for MockProfileGenerator {
    fn default() -> Self {
        Self {
            samples: MOCK_SERIES_LEN,
            late_rows: TRAILING_WINDOW_ROWS,
        }
    }
}

impl MockProfileGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self, token_id: &str, now: DateTime<Utc>) -> MockProfile {
        let seed = identifier_seed(token_id);
        let archetype = Archetype::from_seed(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let (prices, hype) = match archetype {
            Archetype::Clown => self.clown_columns(&mut rng),
            Archetype::Whale => self.whale_columns(&mut rng),
            Archetype::Neutral => self.neutral_columns(&mut rng),
        };

        let end = floor_to_minute(now);
        let first = end - ChronoDuration::minutes(self.samples.saturating_sub(1) as i64);
        let rows = prices
            .into_iter()
            .zip(hype)
            .enumerate()
            .map(|(i, (price, hype_score))| {
                AlignedRow::new(first + ChronoDuration::minutes(i as i64), price, hype_score)
            })
            .collect();

        MockProfile {
            seed,
            archetype,
            series: AlignedSeries::new(rows),
        }
    }

    fn is_late(&self, index: usize) -> bool {
        index >= self.samples.saturating_sub(self.late_rows)
    }

    fn clown_columns(&self, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
        let prices = (0..self.samples)
            .map(|i| {
                let ceiling = if self.is_late(i) {
                    CLOWN_SPIKE_PRICE_CEILING
                } else {
                    CLOWN_PRICE_CEILING
                };
                rng.gen_range(CLOWN_PRICE_FLOOR..=ceiling)
            })
            .collect();
        let hype = (0..self.samples)
            .map(|i| {
                if self.is_late(i) {
                    CLOWN_MAX_HYPE as f64
                } else {
                    rng.gen_range(0..=CLOWN_MAX_HYPE) as f64
                }
            })
            .collect();
        (prices, hype)
    }

    fn whale_columns(&self, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
        let prices = linspace(WHALE_PRICE_START, WHALE_PRICE_END, self.samples);
        let hype = (0..self.samples)
            .map(|i| {
                if self.is_late(i) {
                    0.0
                } else {
                    rng.gen_range(0..=WHALE_MAX_HYPE) as f64
                }
            })
            .collect();
        (prices, hype)
    }

    fn neutral_columns(&self, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
        let prices = linspace(NEUTRAL_PRICE_START, NEUTRAL_PRICE_END, self.samples);
        let hype = (0..self.samples)
            .map(|i| {
                let floor = if self.is_late(i) { NEUTRAL_LATE_MIN_HYPE } else { 0 };
                rng.gen_range(floor..=NEUTRAL_MAX_HYPE) as f64
            })
            .collect();
        (prices, hype)
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

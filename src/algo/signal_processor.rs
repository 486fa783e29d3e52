/// Trailing-window hype ratio and risk classification

use crate::core::{
    AlignedSeries, DataOrigin, HypeSignal, RiskLabel, SignalDetails, CLOWN_ENERGY_THRESHOLD,
    RATIO_EPSILON, TRAILING_WINDOW_ROWS, WHALE_ACCUMULATION_THRESHOLD,
};

/// Mean normalized price and hype over the decision window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverages {
    pub avg_price_norm: f64,
    pub avg_hype_norm: f64,
    pub rows: usize,
}

/// Averages over the last `window` rows of a normalized series
pub fn trailing_averages(series: &AlignedSeries, window: usize) -> WindowAverages {
    let recent = series.trailing(window);
    if recent.is_empty() {
        return WindowAverages {
            avg_price_norm: 0.0,
            avg_hype_norm: 0.0,
            rows: 0,
        };
    }

    let count = recent.len() as f64;
    WindowAverages {
        avg_price_norm: recent.iter().map(|row| row.price_norm).sum::<f64>() / count,
        avg_hype_norm: recent.iter().map(|row| row.hype_norm).sum::<f64>() / count,
        rows: recent.len(),
    }
}

pub fn hype_ratio(avg_hype_norm: f64, avg_price_norm: f64) -> f64 {
    avg_hype_norm / (avg_price_norm + RATIO_EPSILON)
}

/// Strict thresholds: a ratio of exactly 5.0 or 0.5 reads as Neutral
pub fn classify_ratio(ratio: f64) -> RiskLabel {
    if ratio > CLOWN_ENERGY_THRESHOLD {
        RiskLabel::ClownEnergy
    } else if ratio < WHALE_ACCUMULATION_THRESHOLD {
        RiskLabel::WhaleAccumulation
    } else {
        RiskLabel::Neutral
    }
}

/// Reduces a normalized series to its meter reading
pub fn evaluate_series(series: &AlignedSeries, origin: DataOrigin) -> HypeSignal {
    let averages = trailing_averages(series, TRAILING_WINDOW_ROWS);
    let ratio = hype_ratio(averages.avg_hype_norm, averages.avg_price_norm);

    HypeSignal {
        ratio,
        risk_label: classify_ratio(ratio),
        details: SignalDetails {
            avg_price_norm: averages.avg_price_norm,
            avg_hype_norm: averages.avg_hype_norm,
            data_points: series.len(),
        },
        origin,
    }
}

/// Minute-bin resampling and alignment of the price and social streams

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::debug;

use crate::core::{
    AlignedRow, AlignedSeries, SignalError, SocialObservation, TokenObservation, BIN_SECONDS,
    MIN_ALIGNED_ROWS, MIN_RAW_OBSERVATIONS,
};

/// Start of the 1-minute bin containing `timestamp`
pub fn floor_to_minute(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let into_bin = ChronoDuration::seconds(timestamp.timestamp().rem_euclid(BIN_SECONDS))
        + ChronoDuration::nanoseconds(i64::from(timestamp.timestamp_subsec_nanos()));
    timestamp - into_bin
}

/// Fixed 1-minute grid holding the last sample seen in each bin
#[derive(Debug, Clone)]
pub struct MinuteBins {
    start: DateTime<Utc>,
    slots: Vec<Option<(DateTime<Utc>, f64)>>,
}

impl MinuteBins {
    /// Bins spanning the first to the last sample; `None` for an empty stream
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let samples: Vec<(DateTime<Utc>, f64)> = samples.into_iter().collect();
        let first = samples.iter().map(|(ts, _)| *ts).min()?;
        let last = samples.iter().map(|(ts, _)| *ts).max()?;

        let start = floor_to_minute(first);
        let bin_count = bin_index(start, last) + 1;
        let mut slots: Vec<Option<(DateTime<Utc>, f64)>> = vec![None; bin_count];

        for (timestamp, value) in samples {
            let slot = &mut slots[bin_index(start, timestamp)];
            // Later samples win; ties go to the later input
            let replace = match slot {
                Some((seen, _)) => *seen <= timestamp,
                None => true,
            };
            if replace {
                *slot = Some((timestamp, value));
            }
        }

        Some(Self { start, slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bin_start(&self, index: usize) -> DateTime<Utc> {
        self.start + ChronoDuration::minutes(index as i64)
    }

    /// Last value in the bin starting at `bin`, if that bin holds a sample
    pub fn value_at(&self, bin: DateTime<Utc>) -> Option<f64> {
        if bin < self.start {
            return None;
        }
        let index = bin_index(self.start, bin);
        self.slots.get(index).copied().flatten().map(|(_, value)| value)
    }

    /// Empty bins carry the preceding bin's value; bins before the first sample stay unset
    pub fn forward_filled(&self) -> Vec<(DateTime<Utc>, Option<f64>)> {
        let mut carried = None;
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                if let Some((_, value)) = slot {
                    carried = Some(*value);
                }
                (self.bin_start(index), carried)
            })
            .collect()
    }

}

fn bin_index(start: DateTime<Utc>, timestamp: DateTime<Utc>) -> usize {
    (timestamp - start).num_seconds().div_euclid(BIN_SECONDS) as usize
}

/// Joins the two streams onto the price stream's minute grid.
///
/// Price is forward-filled between observations. Minutes without social
/// observations carry a hype score of zero, as does every row when the
/// social stream is empty.
pub fn align_series(
    price_observations: &[TokenObservation],
    social_observations: &[SocialObservation],
) -> Result<AlignedSeries, SignalError> {
    if price_observations.len() < MIN_RAW_OBSERVATIONS {
        return Err(SignalError::InsufficientRawData {
            count: price_observations.len(),
        });
    }

    let price_bins = MinuteBins::from_samples(
        price_observations
            .iter()
            .map(|observation| (observation.timestamp, observation.price)),
    )
    .ok_or(SignalError::InsufficientAlignedData)?;

    let hype_bins = MinuteBins::from_samples(
        social_observations
            .iter()
            .map(|observation| (observation.timestamp, observation.hype_score as f64)),
    );

    let rows: Vec<AlignedRow> = price_bins
        .forward_filled()
        .into_iter()
        .filter_map(|(bin, price)| {
            let price = price?;
            let hype_score = hype_bins
                .as_ref()
                .and_then(|bins| bins.value_at(bin))
                .unwrap_or(0.0);
            Some(AlignedRow::new(bin, price, hype_score))
        })
        .collect();

    debug!(
        "Aligned {} price and {} social observations into {} minute rows",
        price_observations.len(),
        social_observations.len(),
        rows.len()
    );

    if rows.len() < MIN_ALIGNED_ROWS {
        return Err(SignalError::InsufficientAlignedData);
    }

    Ok(AlignedSeries::new(rows))
}

/// Min-max scaling of aligned series columns

use crate::core::{AlignedSeries, SignalError};

/// Scaler fitted to one column's observed minimum and maximum.
///
/// A constant column (min == max) has no spread to scale by; every value
/// in it normalizes to 0.0 and denormalizes back to the column's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// `None` for an empty column
    pub fn fit(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), value| (min.min(*value), max.max(*value)));
        Some(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }

    pub fn transform(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / self.range()
        }
    }

    pub fn inverse_transform(&self, normalized: f64) -> f64 {
        self.min + normalized * self.range()
    }

    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|value| self.transform(*value)).collect()
    }
}

/// Scalers fitted while normalizing a series, one per column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnScalers {
    pub price: MinMaxScaler,
    pub hype: MinMaxScaler,
}

/// Fills `price_norm` and `hype_norm` from each column's own range
pub fn normalize_series(
    mut series: AlignedSeries,
) -> Result<(AlignedSeries, ColumnScalers), SignalError> {
    let price = MinMaxScaler::fit(&series.prices()).ok_or(SignalError::EmptyColumn("price"))?;
    let hype =
        MinMaxScaler::fit(&series.hype_scores()).ok_or(SignalError::EmptyColumn("hype_score"))?;

    for row in series.rows_mut() {
        row.price_norm = price.transform(row.price);
        row.hype_norm = hype.transform(row.hype_score);
    }

    Ok((series, ColumnScalers { price, hype }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AlignedRow;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_scales_to_unit_interval() {
        let scaler = MinMaxScaler::fit(&[10.0, 12.5, 15.0]).unwrap();
        assert_eq!(scaler.transform_all(&[10.0, 12.5, 15.0]), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_round_trip_recovers_values() {
        let values = [3.2, -1.5, 7.75, 0.0, 42.0];
        let scaler = MinMaxScaler::fit(&values).unwrap();

        for value in values {
            let recovered = scaler.inverse_transform(scaler.transform(value));
            assert!((recovered - value).abs() < 1e-9, "{} != {}", recovered, value);
        }
    }

    #[test]
    fn test_constant_column_normalizes_to_zero() {
        let scaler = MinMaxScaler::fit(&[4.0, 4.0, 4.0]).unwrap();
        assert!(scaler.is_degenerate());
        assert_eq!(scaler.transform(4.0), 0.0);
        assert_eq!(scaler.inverse_transform(0.0), 4.0);
    }

    #[test]
    fn test_empty_column() {
        assert!(MinMaxScaler::fit(&[]).is_none());
        assert!(matches!(
            normalize_series(AlignedSeries::default()),
            Err(SignalError::EmptyColumn("price"))
        ));
    }

    #[test]
    fn test_columns_scale_independently() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rows = vec![
            AlignedRow::new(start, 10.0, 0.0),
            AlignedRow::new(start + Duration::minutes(1), 11.0, 50.0),
            AlignedRow::new(start + Duration::minutes(2), 12.0, 200.0),
        ];
        let (series, scalers) = normalize_series(AlignedSeries::new(rows)).unwrap();

        let price_norm: Vec<f64> = series.rows().iter().map(|r| r.price_norm).collect();
        let hype_norm: Vec<f64> = series.rows().iter().map(|r| r.hype_norm).collect();
        assert_eq!(price_norm, vec![0.0, 0.5, 1.0]);
        assert_eq!(hype_norm, vec![0.0, 0.25, 1.0]);
        assert_eq!(scalers.hype.max(), 200.0);
    }
}

/// Hype meter orchestration: live vs. mock data, alignment, normalization, classification

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::{debug, info, instrument, warn};

use crate::algo::mock_profile::MockProfileGenerator;
use crate::algo::normalizer::normalize_series;
use crate::algo::signal_processor::evaluate_series;
use crate::core::{
    AlignedSeries, DataOrigin, HypeSignal, MeterResponse, SignalError, LOOKBACK_HOURS,
};
use crate::database::ObservationSource;
use crate::util::time_series::align_series;

/// Stateless per call; safe to share across request handlers
pub struct HypeAnalyzer {
    source: Arc<dyn ObservationSource>,
    mock_generator: MockProfileGenerator,
    lookback: ChronoDuration,
}

impl HypeAnalyzer {
    pub fn new(source: Arc<dyn ObservationSource>) -> Self {
        Self {
            source,
            mock_generator: MockProfileGenerator::new(),
            lookback: ChronoDuration::hours(LOOKBACK_HOURS),
        }
    }

    pub fn source(&self) -> &Arc<dyn ObservationSource> {
        &self.source
    }

    pub fn compute_signal(&self, token_id: &str) -> Result<HypeSignal, SignalError> {
        self.compute_signal_at(token_id, Utc::now())
    }

    /// Meter reading for `token_id` over the lookback window ending at `now`
    #[instrument(skip(self, now))]
    pub fn compute_signal_at(
        &self,
        token_id: &str,
        now: DateTime<Utc>,
    ) -> Result<HypeSignal, SignalError> {
        let (series, origin) = self.build_series(token_id, now)?;
        let (normalized, scalers) = normalize_series(series)?;
        debug!(
            "Scaled price [{:.6}, {:.6}] and hype [{}, {}]",
            scalers.price.min(),
            scalers.price.max(),
            scalers.hype.min(),
            scalers.hype.max()
        );

        let signal = evaluate_series(&normalized, origin);
        info!(
            "🎯 {} hype ratio {:.4} -> {} ({} points, {:?} data)",
            token_id,
            signal.ratio,
            signal.risk_label,
            signal.details.data_points,
            origin
        );
        Ok(signal)
    }

    /// Wire-form reading, never failing
    pub fn calculate_hype_ratio(&self, token_id: &str) -> MeterResponse {
        MeterResponse::from(&self.compute_signal(token_id))
    }

    fn build_series(
        &self,
        token_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(AlignedSeries, DataOrigin), SignalError> {
        if self.source.count_observations(token_id)? == 0 {
            let profile = self.mock_generator.generate(token_id, now);
            debug!(
                "No data for {}, generated {} mock profile (seed {})",
                token_id, profile.archetype, profile.seed
            );
            return Ok((profile.series, DataOrigin::Mock));
        }

        let since = now - self.lookback;
        let price_observations = self.source.fetch_price_observations(token_id, since)?;
        let social_observations = self.source.fetch_social_observations(since)?;

        let series = align_series(&price_observations, &social_observations).map_err(|e| {
            warn!("⚠️ {} not aligned: {}", token_id, e);
            e
        })?;
        Ok((series, DataOrigin::Live))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::mock_profile::{identifier_seed, Archetype};
    use crate::core::{RiskLabel, SocialObservation, TokenObservation};
    use crate::database::{DatabaseError, MemoryStore};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 16, 45, 0).unwrap()
    }

    fn minutes_ago(minutes: i64) -> DateTime<Utc> {
        now() - ChronoDuration::minutes(minutes)
    }

    fn analyzer_with(store: MemoryStore) -> HypeAnalyzer {
        HypeAnalyzer::new(Arc::new(store))
    }

    fn token_for(archetype: Archetype, prefix: &str) -> String {
        (0..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|id| Archetype::from_seed(identifier_seed(id)) == archetype)
            .unwrap()
    }

    fn price(policy_id: &str, timestamp: DateTime<Utc>, price: f64) -> TokenObservation {
        TokenObservation {
            policy_id: policy_id.to_string(),
            price,
            volume: 45_000_000_000.0,
            timestamp,
        }
    }

    fn social(timestamp: DateTime<Utc>, hype_score: u64) -> SocialObservation {
        SocialObservation {
            keywords: vec!["$TOKEN".to_string()],
            hype_score,
            source: "twitter".to_string(),
            timestamp,
        }
    }

    struct FailingSource;

    impl ObservationSource for FailingSource {
        fn count_observations(&self, _token_id: &str) -> Result<usize, DatabaseError> {
            Err(DatabaseError::QueryError("connection refused".to_string()))
        }

        fn fetch_price_observations(
            &self,
            _token_id: &str,
            _since: DateTime<Utc>,
        ) -> Result<Vec<TokenObservation>, DatabaseError> {
            Ok(Vec::new())
        }

        fn fetch_social_observations(
            &self,
            _since: DateTime<Utc>,
        ) -> Result<Vec<SocialObservation>, DatabaseError> {
            Ok(Vec::new())
        }

        fn latest_price_observations(
            &self,
            _token_id: &str,
            _limit: usize,
        ) -> Result<Vec<TokenObservation>, DatabaseError> {
            Ok(Vec::new())
        }

        fn latest_social_observations(
            &self,
            _limit: usize,
        ) -> Result<Vec<SocialObservation>, DatabaseError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_mock_clown_token() {
        assert_eq!(Archetype::from_seed(identifier_seed("CLOWN_TOKEN")), Archetype::Clown);
        let signal = analyzer_with(MemoryStore::new())
            .compute_signal_at("CLOWN_TOKEN", now())
            .unwrap();

        assert_eq!(signal.origin, DataOrigin::Mock);
        assert_eq!(signal.details.data_points, 1440);
        assert!((signal.details.avg_hype_norm - 1.0).abs() < 1e-9);
        assert!(signal.details.avg_price_norm < 0.2);
        assert!(signal.ratio > 5.0);
        assert_eq!(signal.risk_label, RiskLabel::ClownEnergy);
    }

    #[test]
    fn test_mock_archetypes_match_labels() {
        let analyzer = analyzer_with(MemoryStore::new());
        for (archetype, prefix) in [
            (Archetype::Clown, "MEME_"),
            (Archetype::Whale, "WHALE_"),
            (Archetype::Neutral, "NEUTRAL_"),
        ] {
            for n in 0..5 {
                let token = token_for(archetype, &format!("{}{}_", prefix, n));
                let signal = analyzer.compute_signal_at(&token, now()).unwrap();
                assert_eq!(
                    signal.risk_label,
                    archetype.expected_label(),
                    "{} ({}) ratio {}",
                    token,
                    archetype,
                    signal.ratio
                );
            }
        }
    }

    #[test]
    fn test_mock_whale_averages() {
        let token = token_for(Archetype::Whale, "WHALE_");
        let signal = analyzer_with(MemoryStore::new())
            .compute_signal_at(&token, now())
            .unwrap();

        assert!(signal.details.avg_price_norm > 0.95);
        assert!(signal.details.avg_hype_norm < 0.05);
        assert!(signal.ratio < 0.5);
    }

    #[test]
    fn test_mock_is_reproducible() {
        let analyzer = analyzer_with(MemoryStore::new());
        let first = analyzer.compute_signal_at("TEST", now()).unwrap();
        let second = analyzer.compute_signal_at("TEST", now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.risk_label, RiskLabel::Neutral);
    }

    #[test]
    fn test_live_raw_guard() {
        let store = MemoryStore::new();
        for i in 0..9 {
            store.insert_token_observation(price("SPARSE", minutes_ago(i), 1.0));
        }
        // Stale history still counts as "has data" but falls outside the window
        store.insert_token_observation(price("SPARSE", minutes_ago(3 * 24 * 60), 1.0));

        let result = analyzer_with(store).compute_signal_at("SPARSE", now());
        match result {
            Err(SignalError::InsufficientRawData { count }) => assert_eq!(count, 9),
            other => panic!("expected raw insufficiency, got {:?}", other),
        }
    }

    #[test]
    fn test_live_exactly_ten_points() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store.insert_token_observation(price("TEN", minutes_ago(9 - i), 10.0 + i as f64));
        }

        let signal = analyzer_with(store).compute_signal_at("TEN", now()).unwrap();
        assert_eq!(signal.origin, DataOrigin::Live);
        assert_eq!(signal.details.data_points, 10);
        // No social data: hype is flat zero
        assert_eq!(signal.details.avg_hype_norm, 0.0);
        assert_eq!(signal.risk_label, RiskLabel::WhaleAccumulation);
    }

    #[test]
    fn test_live_aligned_guard() {
        let store = MemoryStore::new();
        for i in 0..12 {
            store.insert_token_observation(price(
                "BURST",
                now() - ChronoDuration::seconds(i * 10),
                1.0,
            ));
        }

        let result = analyzer_with(store).compute_signal_at("BURST", now());
        assert!(matches!(result, Err(SignalError::InsufficientAlignedData)));
    }

    #[test]
    fn test_live_whale_scenario() {
        let store = MemoryStore::new();
        for i in 0..1440i64 {
            let timestamp = minutes_ago(1439 - i);
            store.insert_token_observation(price("WHALE", timestamp, 10.0 + 5.0 * i as f64 / 1439.0));
            let hype = if i >= 1380 {
                u64::from(i % 10 == 0)
            } else {
                (i % 6) as u64
            };
            store.insert_social_observation(social(timestamp, hype)).unwrap();
        }

        let signal = analyzer_with(store).compute_signal_at("WHALE", now()).unwrap();
        assert_eq!(signal.details.data_points, 1440);
        assert!(signal.details.avg_price_norm > 0.95);
        assert!(signal.details.avg_hype_norm <= 0.05);
        assert_eq!(signal.risk_label, RiskLabel::WhaleAccumulation);
    }

    #[test]
    fn test_live_clown_scenario() {
        let store = MemoryStore::new();
        for i in 0..1440i64 {
            let timestamp = minutes_ago(1439 - i);
            let (token_price, hype) = if i >= 1380 {
                (10.0, 100)
            } else {
                (10.0 + 0.1 * (i % 3) as f64, ((i * 37) % 100) as u64)
            };
            store.insert_token_observation(price("CLOWN", timestamp, token_price));
            store.insert_social_observation(social(timestamp, hype)).unwrap();
        }

        let signal = analyzer_with(store).compute_signal_at("CLOWN", now()).unwrap();
        assert_eq!(signal.details.avg_price_norm, 0.0);
        assert!((signal.details.avg_hype_norm - 1.0).abs() < 1e-12);
        assert_eq!(signal.risk_label, RiskLabel::ClownEnergy);
    }

    #[test]
    fn test_source_failure_is_reported() {
        let analyzer = HypeAnalyzer::new(Arc::new(FailingSource));
        let result = analyzer.compute_signal_at("ANY", now());
        assert!(matches!(result, Err(SignalError::Source(_))));

        let response = analyzer.calculate_hype_ratio("ANY");
        assert!(!response.is_success());
    }
}

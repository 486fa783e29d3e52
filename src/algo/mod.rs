/// Hype meter analytics

pub mod mock_profile;
pub mod normalizer;
pub mod signal_processor;
pub mod analyzer;

pub use analyzer::HypeAnalyzer;
pub use mock_profile::{Archetype, MockProfile, MockProfileGenerator};
pub use normalizer::{normalize_series, ColumnScalers, MinMaxScaler};
pub use signal_processor::{classify_ratio, evaluate_series, hype_ratio, trailing_averages};

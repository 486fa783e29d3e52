/// Fixed analytics constants for the hype meter

/// Trailing lookback queried from the observation store
pub const LOOKBACK_HOURS: i64 = 24;

/// Newest token and social points returned for charting
pub const HISTORY_POINTS: usize = 50;

/// Width of one aligned bin, in seconds
pub const BIN_SECONDS: i64 = 60;

/// One sample per minute over the lookback window
pub const MOCK_SERIES_LEN: usize = 1440;

/// Most recent hour at 1-minute granularity
pub const TRAILING_WINDOW_ROWS: usize = 60;

pub const MIN_RAW_OBSERVATIONS: usize = 10;
pub const MIN_ALIGNED_ROWS: usize = 10;

/// Keeps the ratio finite when the window's price is flat-normalized to 0
pub const RATIO_EPSILON: f64 = 0.0001;

pub const CLOWN_ENERGY_THRESHOLD: f64 = 5.0;
pub const WHALE_ACCUMULATION_THRESHOLD: f64 = 0.5;

pub const CLOWN_ENERGY_MESSAGE: &str = "High Hype / Low Price Move. Artificial pumping detected.";
pub const WHALE_ACCUMULATION_MESSAGE: &str = "Low Hype / High Price Move. Smart money is buying silently.";
pub const NEUTRAL_MESSAGE: &str = "Market is balanced.";

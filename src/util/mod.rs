/// Time-series plumbing and terminal output helpers

pub mod time_series;
pub mod display;

pub use time_series::{align_series, floor_to_minute, MinuteBins};

// Core types, constants and errors
pub mod core;

// Meter analytics
pub mod algo;

// Resampling and terminal output helpers
pub mod util;

// Observation store
pub mod database;

// Configuration and logging
pub mod config;
pub mod logging;

// HTTP surface
pub mod api;

// Re-export commonly used types for convenience
pub use algo::HypeAnalyzer;
pub use core::*;
pub use database::{MemoryStore, ObservationSource};

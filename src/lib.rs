//! RideForge - text workouts to Zwift files
//!
//! Converts line-oriented, free-text descriptions of cycling workouts into
//! Zwift `.zwo` interval files and PNG charts of power over time.

pub mod chart;
pub mod convert;
pub mod metrics;
pub mod queue;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use chart::ChartRenderer;
pub use convert::{ConversionOutput, ConvertError, Converter};
pub use metrics::zones::PowerZoneTable;
pub use queue::{process_queue, BatchReport};
pub use storage::config::AppConfig;
pub use workouts::{parse_workout, write_zwo, WorkoutDocument};

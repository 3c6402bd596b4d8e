//! Workout module: free-text parsing and .zwo output.

pub mod classifier;
pub mod ramp;
pub mod tokens;
pub mod types;
pub mod zwo_writer;

pub use classifier::{classify_line, parse_workout, parse_workout_text};
pub use ramp::{ramp_steps, RampStep};
pub use types::{
    ConversionRules, IntervalSet, LineOutcome, PowerTarget, SegmentKind, SkipReason,
    WorkoutBlock, WorkoutDocument, WorkoutSegment,
};
pub use zwo_writer::{write_zwo, ZwoWriteError};

//! Workout types and enums.
//!
//! A [`WorkoutDocument`] is the one canonical interpretation of a text
//! workout. The .zwo writer and the chart renderer are both projections of it.

use serde::{Deserialize, Serialize};

use crate::workouts::ramp::{ramp_steps, RampStep};

/// Power used when a line carries no percentage.
pub const DEFAULT_POWER: f64 = 0.6;
/// Recovery power for the "off" half of an interval.
pub const DEFAULT_INTERVAL_OFF_POWER: f64 = 0.55;
/// Neutral power used to draw free ride segments.
pub const FREE_RIDE_DISPLAY_POWER: f64 = 0.65;
/// Length of one ramp step in seconds.
pub const DEFAULT_RAMP_STEP_SECONDS: u32 = 15;
/// Longest duration accepted on one line (24 hours).
pub const DEFAULT_MAX_SEGMENT_SECONDS: u32 = 24 * 60 * 60;
/// Largest repeat count accepted on one line.
pub const DEFAULT_MAX_REPEAT: u32 = 1_000;

/// Type of workout segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Constant power
    Steady,
    /// Linear power change
    Ramp,
    /// Work half of a repeat
    IntervalOn,
    /// Recovery half of a repeat
    IntervalOff,
    /// No power target
    FreeRide,
}

/// Power target as a fraction of FTP (1.0 = threshold).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerTarget {
    /// Single power held for the whole segment
    Fixed(f64),
    /// Linear sweep from `low` to `high`
    Range { low: f64, high: f64 },
}

impl PowerTarget {
    /// Power at the start of the segment.
    pub fn start(&self) -> f64 {
        match self {
            PowerTarget::Fixed(p) => *p,
            PowerTarget::Range { low, .. } => *low,
        }
    }
}

/// A single scheduled block of effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSegment {
    /// Type of segment
    pub kind: SegmentKind,
    /// Duration in seconds, always positive
    pub duration_seconds: u32,
    /// Power target
    pub power: PowerTarget,
    /// Optional cadence target in RPM
    pub cadence_rpm: Option<u32>,
}

impl WorkoutSegment {
    pub fn steady(duration_seconds: u32, power: f64, cadence_rpm: Option<u32>) -> Self {
        Self {
            kind: SegmentKind::Steady,
            duration_seconds,
            power: PowerTarget::Fixed(power),
            cadence_rpm,
        }
    }

    pub fn free_ride(duration_seconds: u32, display_power: f64, cadence_rpm: Option<u32>) -> Self {
        Self {
            kind: SegmentKind::FreeRide,
            duration_seconds,
            power: PowerTarget::Fixed(display_power),
            cadence_rpm,
        }
    }

    pub fn ramp(duration_seconds: u32, low: f64, high: f64, cadence_rpm: Option<u32>) -> Self {
        Self {
            kind: SegmentKind::Ramp,
            duration_seconds,
            power: PowerTarget::Range { low, high },
            cadence_rpm,
        }
    }
}

/// A compact "N x on/off" repeat as matched on one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    pub repeat: u32,
    pub on_duration_seconds: u32,
    pub off_duration_seconds: u32,
    pub on_power: f64,
    pub off_power: f64,
    /// Cadence for the "on" half only
    pub cadence_rpm: Option<u32>,
}

impl IntervalSet {
    /// Expand into `repeat` on/off pairs.
    ///
    /// The "off" segment never inherits the "on" cadence.
    pub fn expand(&self) -> Vec<WorkoutSegment> {
        let mut segments = Vec::with_capacity(self.repeat as usize * 2);

        for _ in 0..self.repeat {
            segments.push(WorkoutSegment {
                kind: SegmentKind::IntervalOn,
                duration_seconds: self.on_duration_seconds,
                power: PowerTarget::Fixed(self.on_power),
                cadence_rpm: self.cadence_rpm,
            });
            segments.push(WorkoutSegment {
                kind: SegmentKind::IntervalOff,
                duration_seconds: self.off_duration_seconds,
                power: PowerTarget::Fixed(self.off_power),
                cadence_rpm: None,
            });
        }

        segments
    }

    /// Total duration of all repeats.
    pub fn total_duration_seconds(&self) -> u32 {
        self.repeat
            .saturating_mul(self.on_duration_seconds.saturating_add(self.off_duration_seconds))
    }
}

/// The interpretation of one source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutBlock {
    Steady(WorkoutSegment),
    FreeRide(WorkoutSegment),
    Ramp(WorkoutSegment),
    Intervals(IntervalSet),
}

impl WorkoutBlock {
    /// Segments this block contributes to the canonical sequence.
    pub fn segments(&self) -> Vec<WorkoutSegment> {
        match self {
            WorkoutBlock::Steady(s) | WorkoutBlock::FreeRide(s) | WorkoutBlock::Ramp(s) => {
                vec![s.clone()]
            }
            WorkoutBlock::Intervals(set) => set.expand(),
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        match self {
            WorkoutBlock::Steady(s) | WorkoutBlock::FreeRide(s) | WorkoutBlock::Ramp(s) => {
                s.duration_seconds
            }
            WorkoutBlock::Intervals(set) => set.total_duration_seconds(),
        }
    }
}

/// Why a line produced no segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No "<n>min" / "<n>sec" token, or a zero duration
    NoDuration,
    /// Duration found but no "<n>% FTP" token
    NoPower,
    /// "from ... to" line missing one of its two percentages
    MalformedRamp,
    /// "0x" repeat
    ZeroRepeat,
    /// Duration above `ConversionRules::max_segment_seconds`
    DurationTooLong,
    /// Repeat count above `ConversionRules::max_repeat`
    TooManyRepeats,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoDuration => write!(f, "no duration"),
            SkipReason::NoPower => write!(f, "no power target"),
            SkipReason::MalformedRamp => write!(f, "incomplete ramp"),
            SkipReason::ZeroRepeat => write!(f, "zero repeats"),
            SkipReason::DurationTooLong => write!(f, "duration over limit"),
            SkipReason::TooManyRepeats => write!(f, "repeat count over limit"),
        }
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Block(WorkoutBlock),
    Skipped(SkipReason),
}

/// Tunable constants for turning text into segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionRules {
    /// Power assumed when a line has no percentage
    pub default_power: f64,
    /// Power of the recovery half of an interval
    pub interval_off_power: f64,
    /// Height of free ride bars on the chart
    pub free_ride_display_power: f64,
    /// Seconds per ramp step
    pub ramp_step_seconds: u32,
    /// Lines with a longer duration are skipped
    pub max_segment_seconds: u32,
    /// Lines repeating more often are skipped
    pub max_repeat: u32,
}

impl Default for ConversionRules {
    fn default() -> Self {
        Self {
            default_power: DEFAULT_POWER,
            interval_off_power: DEFAULT_INTERVAL_OFF_POWER,
            free_ride_display_power: FREE_RIDE_DISPLAY_POWER,
            ramp_step_seconds: DEFAULT_RAMP_STEP_SECONDS,
            max_segment_seconds: DEFAULT_MAX_SEGMENT_SECONDS,
            max_repeat: DEFAULT_MAX_REPEAT,
        }
    }
}

/// An ordered, immutable workout built from one text file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDocument {
    /// Display name (input file stem)
    pub name: String,
    /// Seconds per ramp step, shared by every projection
    pub ramp_step_seconds: u32,
    /// One block per recognised line, in source order
    pub blocks: Vec<WorkoutBlock>,
}

impl WorkoutDocument {
    pub fn new(name: impl Into<String>, ramp_step_seconds: u32, blocks: Vec<WorkoutBlock>) -> Self {
        Self {
            name: name.into(),
            ramp_step_seconds,
            blocks,
        }
    }

    /// The canonical segment sequence with intervals expanded in place.
    pub fn segments(&self) -> Vec<WorkoutSegment> {
        self.blocks.iter().flat_map(WorkoutBlock::segments).collect()
    }

    pub fn total_duration_seconds(&self) -> u32 {
        self.blocks
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.duration_seconds()))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Discrete steps for a segment. Non-ramp segments yield a single step.
    pub fn steps_for(&self, segment: &WorkoutSegment) -> Vec<RampStep> {
        match segment.power {
            PowerTarget::Range { low, high } => {
                ramp_steps(segment.duration_seconds, low, high, self.ramp_step_seconds)
            }
            PowerTarget::Fixed(p) => vec![RampStep {
                offset_seconds: 0.0,
                duration_seconds: segment.duration_seconds as f64,
                power: p,
            }],
        }
    }
}

//! Stepped approximation of a linear power ramp.
//!
//! Both the .zwo writer and the chart draw ramps from this one routine, so
//! their step boundaries and powers always agree.

/// One constant-power slice of a ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStep {
    /// Start of the step relative to the start of the ramp
    pub offset_seconds: f64,
    /// Length of the step (not rounded)
    pub duration_seconds: f64,
    /// Power as a fraction of FTP
    pub power: f64,
}

/// Number of steps for a ramp: one per full `step_seconds`, at least one.
pub fn step_count(duration_seconds: u32, step_seconds: u32) -> u32 {
    (duration_seconds / step_seconds.max(1)).max(1)
}

/// Split a ramp into equal-length constant-power steps.
///
/// With more than one step the first step is exactly `low` and the last is
/// exactly `high`. A single step holds the midpoint.
pub fn ramp_steps(duration_seconds: u32, low: f64, high: f64, step_seconds: u32) -> Vec<RampStep> {
    let steps = step_count(duration_seconds, step_seconds);
    let step_duration = duration_seconds as f64 / steps as f64;

    (0..steps)
        .map(|i| {
            let power = if steps == 1 {
                (low + high) / 2.0
            } else if i == steps - 1 {
                high
            } else {
                low + (high - low) * (i as f64 / (steps - 1) as f64)
            };

            RampStep {
                offset_seconds: i as f64 * step_duration,
                duration_seconds: step_duration,
                power,
            }
        })
        .collect()
}

//! Free-text workout line classifier.
//!
//! Each line is tested in a fixed order and the first match wins:
//! duration, free ride, power, ramp, repeat, steady state. Lines that do not
//! match are dropped without error so commentary can live in the same file.

use crate::workouts::tokens::{
    find_power_fraction, has_ftp_power, parse_cadence, parse_duration_to_seconds,
    parse_ramp_bounds, parse_repeat,
};
use crate::workouts::types::{
    ConversionRules, IntervalSet, LineOutcome, SkipReason, WorkoutBlock, WorkoutDocument,
    WorkoutSegment,
};

/// Classify a single trimmed line.
pub fn classify_line(line: &str, rules: &ConversionRules) -> LineOutcome {
    let duration = match parse_duration_to_seconds(line) {
        0 => return LineOutcome::Skipped(SkipReason::NoDuration),
        seconds => match u32::try_from(seconds) {
            Ok(d) if d <= rules.max_segment_seconds => d,
            _ => return LineOutcome::Skipped(SkipReason::DurationTooLong),
        },
    };

    let cadence = parse_cadence(line);
    let lower = line.to_lowercase();

    if lower.contains("free ride") {
        return LineOutcome::Block(WorkoutBlock::FreeRide(WorkoutSegment::free_ride(
            duration,
            rules.free_ride_display_power,
            cadence,
        )));
    }

    if !has_ftp_power(line) {
        return LineOutcome::Skipped(SkipReason::NoPower);
    }

    if lower.contains("from") && lower.contains("to") {
        return match parse_ramp_bounds(line) {
            Some((low, high)) => LineOutcome::Block(WorkoutBlock::Ramp(WorkoutSegment::ramp(
                duration, low, high, cadence,
            ))),
            None => LineOutcome::Skipped(SkipReason::MalformedRamp),
        };
    }

    let power = find_power_fraction(line).unwrap_or(rules.default_power);

    if let Some(count) = parse_repeat(line) {
        let repeat = match u32::try_from(count) {
            Ok(0) => return LineOutcome::Skipped(SkipReason::ZeroRepeat),
            Ok(n) if n <= rules.max_repeat => n,
            _ => return LineOutcome::Skipped(SkipReason::TooManyRepeats),
        };
        return LineOutcome::Block(WorkoutBlock::Intervals(IntervalSet {
            repeat,
            on_duration_seconds: duration,
            off_duration_seconds: duration,
            on_power: power,
            off_power: rules.interval_off_power,
            cadence_rpm: cadence,
        }));
    }

    LineOutcome::Block(WorkoutBlock::Steady(WorkoutSegment::steady(
        duration, power, cadence,
    )))
}

/// Build the canonical document from raw lines.
///
/// Lines are trimmed and blank lines ignored.
pub fn parse_workout<I, S>(name: &str, lines: I, rules: &ConversionRules) -> WorkoutDocument
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        match classify_line(line, rules) {
            LineOutcome::Block(block) => blocks.push(block),
            LineOutcome::Skipped(reason) => {
                tracing::debug!(line_number = index + 1, %reason, "Skipping line: {}", line);
            }
        }
    }

    WorkoutDocument::new(name, rules.ramp_step_seconds, blocks)
}

/// Build the canonical document from file contents.
pub fn parse_workout_text(name: &str, content: &str, rules: &ConversionRules) -> WorkoutDocument {
    parse_workout(name, content.lines(), rules)
}

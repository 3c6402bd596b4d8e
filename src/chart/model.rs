//! Chart model: what to draw, independent of how it is drawn.

use crate::metrics::zones::{Color, PowerZoneTable};
use crate::storage::config::ChartSettings;
use crate::workouts::types::{SegmentKind, WorkoutDocument};

/// Fill used for free ride bars.
pub const FREE_RIDE_COLOR: Color = Color::new(0xD3, 0xD3, 0xD3);

/// Y axis ticks as power fractions (0% to 150%).
pub const Y_TICKS: [f64; 7] = [0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5];

/// How a bar is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// Solid zone color
    Zone,
    /// Hatched neutral block labelled "FREE RIDE"
    FreeRide,
}

/// A constant-power rectangle on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub power: f64,
    pub color: Color,
    pub style: BarStyle,
}

/// A labelled axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// A legend swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Everything needed to draw one workout chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub total_seconds: u32,
    pub max_power: f64,
    pub bars: Vec<ChartBar>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
}

/// Seconds between x axis ticks for a workout of the given length.
pub fn x_tick_interval(total_seconds: u32, settings: &ChartSettings) -> u32 {
    if total_seconds > settings.long_workout_seconds {
        settings.long_tick_seconds
    } else {
        settings.short_tick_seconds
    }
}

/// Ticks from zero to the end of the workout, labelled in whole minutes.
pub fn x_ticks(total_seconds: u32, settings: &ChartSettings) -> Vec<AxisTick> {
    let step = x_tick_interval(total_seconds, settings).max(1) as usize;
    (0..=total_seconds)
        .step_by(step)
        .map(|t| AxisTick {
            value: t as f64,
            label: format!("{}m", t / 60),
        })
        .collect()
}

fn y_ticks() -> Vec<AxisTick> {
    Y_TICKS
        .iter()
        .map(|&p| AxisTick {
            value: p,
            label: format!("{}%", (p * 100.0).round() as i64),
        })
        .collect()
}

/// Build the chart for a workout document.
///
/// Ramps are drawn as their steps, each colored by its own power. Free ride
/// segments are drawn at their display power in neutral styling.
pub fn build_chart(
    doc: &WorkoutDocument,
    zones: &PowerZoneTable,
    settings: &ChartSettings,
) -> ChartModel {
    let mut bars = Vec::new();
    let mut elapsed = 0.0f64;

    for segment in doc.segments() {
        if segment.kind == SegmentKind::FreeRide {
            bars.push(ChartBar {
                start_seconds: elapsed,
                duration_seconds: segment.duration_seconds as f64,
                power: segment.power.start(),
                color: FREE_RIDE_COLOR,
                style: BarStyle::FreeRide,
            });
        } else {
            for step in doc.steps_for(&segment) {
                bars.push(ChartBar {
                    start_seconds: elapsed + step.offset_seconds,
                    duration_seconds: step.duration_seconds,
                    power: step.power,
                    color: zones.classify(step.power).color,
                    style: BarStyle::Zone,
                });
            }
        }
        elapsed += segment.duration_seconds as f64;
    }

    let total_seconds = doc.total_duration_seconds();
    let legend = zones
        .legend(settings.legend_open_top_at)
        .into_iter()
        .map(|(label, color)| LegendEntry { label, color })
        .collect();

    ChartModel {
        title: format!("Workout: {}", doc.name),
        x_label: "Time (seconds)".to_string(),
        y_label: "Power (% FTP)".to_string(),
        total_seconds,
        max_power: settings.max_power,
        bars,
        x_ticks: x_ticks(total_seconds, settings),
        y_ticks: y_ticks(),
        legend,
    }
}

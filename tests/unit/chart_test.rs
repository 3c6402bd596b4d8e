//! Unit tests for the chart model.

use rideforge::chart::model::{build_chart, BarStyle, FREE_RIDE_COLOR};
use rideforge::metrics::zones::PowerZoneTable;
use rideforge::storage::config::ChartSettings;
use rideforge::workouts::classifier::parse_workout_text;
use rideforge::workouts::types::ConversionRules;
use rideforge::workouts::zwo_writer::write_zwo;

const WORKOUT: &str = "10min from 50% to 80% FTP
4x 30sec @ 105rpm, 85% FTP
3min free ride
5min @ 95% FTP";

#[test]
fn test_chart_covers_whole_workout() {
    let doc = parse_workout_text("chart", WORKOUT, &ConversionRules::default());
    let chart = build_chart(&doc, &PowerZoneTable::default(), &ChartSettings::default());

    assert_eq!(chart.total_seconds, 600 + 240 + 180 + 300);
    let drawn: f64 = chart.bars.iter().map(|b| b.duration_seconds).sum();
    assert!((drawn - chart.total_seconds as f64).abs() < 1e-6);

    // Bars are contiguous.
    for pair in chart.bars.windows(2) {
        let end = pair[0].start_seconds + pair[0].duration_seconds;
        assert!((end - pair[1].start_seconds).abs() < 1e-6);
    }
}

#[test]
fn test_chart_and_zwo_use_same_ramp_steps() {
    let doc = parse_workout_text("ramp", "10min from 50% to 80% FTP", &ConversionRules::default());
    let chart = build_chart(&doc, &PowerZoneTable::default(), &ChartSettings::default());
    let xml = write_zwo(&doc).unwrap();

    assert_eq!(chart.bars.len(), 40);
    assert_eq!(xml.matches("<SteadyState").count(), chart.bars.len());
    for bar in &chart.bars {
        assert!(xml.contains(&format!(r#"Power="{:.3}""#, bar.power)));
    }
    assert!((chart.bars[0].power - 0.5).abs() < 1e-12);
    assert!((chart.bars[39].power - 0.8).abs() < 1e-12);
}

#[test]
fn test_interval_bars_expanded() {
    let doc = parse_workout_text("reps", "4x 30sec @ 105rpm, 85% FTP", &ConversionRules::default());
    let chart = build_chart(&doc, &PowerZoneTable::default(), &ChartSettings::default());
    let zones = PowerZoneTable::default();

    assert_eq!(chart.bars.len(), 8);
    assert_eq!(chart.bars[0].color, zones.classify(0.85).color);
    assert_eq!(chart.bars[1].color, zones.classify(0.55).color);
}

#[test]
fn test_free_ride_bar_is_neutral() {
    let doc = parse_workout_text("free", "3min free ride @ 150% FTP", &ConversionRules::default());
    let chart = build_chart(&doc, &PowerZoneTable::default(), &ChartSettings::default());

    assert_eq!(chart.bars.len(), 1);
    assert_eq!(chart.bars[0].style, BarStyle::FreeRide);
    assert_eq!(chart.bars[0].color, FREE_RIDE_COLOR);
    assert_eq!(chart.bars[0].power, 0.65);
}

#[test]
fn test_long_workout_ticks_every_five_minutes() {
    let doc = parse_workout_text("long", WORKOUT, &ConversionRules::default());
    let chart = build_chart(&doc, &PowerZoneTable::default(), &ChartSettings::default());

    let values: Vec<f64> = chart.x_ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 300.0, 600.0, 900.0, 1200.0]);
    assert_eq!(chart.x_ticks[4].label, "20m");
}

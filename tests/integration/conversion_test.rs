//! Integration tests for single-file conversion.

use std::fs;

use rideforge::chart::ChartRenderer;
use rideforge::convert::{process_single_file, ConvertError, Converter};
use rideforge::metrics::zones::PowerZoneTable;
use rideforge::storage::config::{parse_config, ChartSettings};
use rideforge::workouts::types::ConversionRules;

const WORKOUT: &str = "Threshold builder
10min from 50% to 75% FTP @ 90rpm
3x 8min @ 100% FTP
5min free ride
";

fn small_chart() -> ChartRenderer {
    let settings = ChartSettings {
        width: 300,
        height: 150,
        ..ChartSettings::default()
    };
    ChartRenderer::new(settings, PowerZoneTable::default())
}

#[test]
fn test_convert_without_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("threshold.txt");
    fs::write(&input, WORKOUT).unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let output = process_single_file(&converter, &input).unwrap();

    assert_eq!(output.zwo_path, dir.path().join("threshold.zwo"));
    assert!(output.chart_path.is_none());
    assert!(!dir.path().join("threshold.png").exists());

    let xml = fs::read_to_string(&output.zwo_path).unwrap();
    assert!(xml.starts_with("<workout_file>"));
    assert!(xml.contains("<name>threshold</name>"));
    assert!(xml.contains("<author>Converted from TXT</author>"));
    assert!(xml.contains("<sportType>bike</sportType>"));
    assert!(xml.contains(
        r#"<IntervalsT Repeat="3" OnDuration="480" OffDuration="480" OnPower="1.0" OffPower="0.55"/>"#
    ));
    assert!(xml.contains(r#"<FreeRide Duration="300"/>"#));
    assert_eq!(xml.matches(r#"Cadence="90""#).count(), 40);
}

#[test]
fn test_convert_with_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("with chart.txt");
    fs::write(&input, WORKOUT).unwrap();

    let converter = Converter::new(ConversionRules::default(), Some(small_chart()));
    let output = process_single_file(&converter, &input).unwrap();

    let chart = output.chart_path.expect("chart should be written");
    assert_eq!(chart, dir.path().join("with chart.png"));
    let bytes = fs::read(&chart).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn test_chart_failure_keeps_zwo() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blocked.txt");
    fs::write(&input, WORKOUT).unwrap();
    // A directory where the PNG should go makes the image write fail.
    fs::create_dir(dir.path().join("blocked.png")).unwrap();

    let converter = Converter::new(ConversionRules::default(), Some(small_chart()));
    let output = converter.convert_file(&input, dir.path()).unwrap();

    assert!(output.chart_path.is_none());
    assert_eq!(output.zwo_path, dir.path().join("blocked.zwo"));
    let xml = fs::read_to_string(&output.zwo_path).unwrap();
    assert!(xml.contains("<IntervalsT Repeat=\"3\""));
    assert!(dir.path().join("blocked.png").is_dir());
}

#[test]
fn test_oversized_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.txt");
    fs::write(
        &input,
        "4000000000x 30sec @ 100% FTP\n99999999999min from 50% to 80% FTP\n5min @ 70% FTP\n",
    )
    .unwrap();

    let converter = Converter::new(ConversionRules::default(), Some(small_chart()));
    let output = converter.convert_file(&input, dir.path()).unwrap();

    let xml = fs::read_to_string(&output.zwo_path).unwrap();
    assert!(!xml.contains("IntervalsT"));
    assert_eq!(xml.matches("<SteadyState").count(), 1);
    assert!(xml.contains(r#"<SteadyState Duration="300" Power="0.7"/>"#));
    assert!(output.chart_path.is_some());
}

#[test]
fn test_converter_follows_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ramp.txt");
    fs::write(&input, "2min from 40% to 70% FTP\n").unwrap();

    let config = parse_config("[rules]\nramp_step_seconds = 30\n\n[chart]\nenabled = false\n").unwrap();
    let converter = Converter::from_config(&config).unwrap();
    let output = converter.convert_file(&input, dir.path()).unwrap();

    assert!(output.chart_path.is_none());
    let xml = fs::read_to_string(&output.zwo_path).unwrap();
    assert_eq!(xml.matches(r#"<SteadyState Duration="30""#).count(), 4);
    assert!(xml.contains(r#"Power="0.400""#));
    assert!(xml.contains(r#"Power="0.700""#));
}

#[test]
fn test_unrecognised_text_still_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "remember to hydrate\n").unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let output = process_single_file(&converter, &input).unwrap();

    let xml = fs::read_to_string(&output.zwo_path).unwrap();
    assert!(xml.contains("<workout>"));
    assert!(!xml.contains("SteadyState"));
}

#[test]
fn test_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("workout.csv");
    fs::write(&input, WORKOUT).unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let result = process_single_file(&converter, &input);

    assert!(matches!(result, Err(ConvertError::WrongExtension(_))));
    assert!(!dir.path().join("workout.zwo").exists());
}

#[test]
fn test_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let converter = Converter::new(ConversionRules::default(), None);

    let result = process_single_file(&converter, &dir.path().join("absent.txt"));
    assert!(matches!(result, Err(ConvertError::NotFound(_))));
}

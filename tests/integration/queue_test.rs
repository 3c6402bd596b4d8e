//! Integration tests for batch queue processing.

use std::fs;
use std::path::Path;

use rideforge::convert::Converter;
use rideforge::queue::process_queue;
use rideforge::storage::config::QueueSettings;
use rideforge::workouts::types::ConversionRules;

fn settings(root: &Path) -> QueueSettings {
    QueueSettings {
        queue_dir: root.join("queue"),
        output_dir: root.join("zwo"),
        archive_dir: root.join("txt"),
    }
}

#[test]
fn test_queue_converts_and_archives() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    fs::create_dir_all(&settings.queue_dir).unwrap();
    fs::write(settings.queue_dir.join("a.txt"), "10min @ 60% FTP\n").unwrap();
    fs::write(settings.queue_dir.join("b.txt"), "4x 1min @ 120% FTP\n").unwrap();
    fs::write(settings.queue_dir.join("readme.md"), "not a workout").unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let report = process_queue(&converter, &settings).unwrap();

    assert_eq!(report.converted.len(), 2);
    assert!(report.failed.is_empty());
    assert!(settings.output_dir.join("a.zwo").exists());
    assert!(settings.output_dir.join("b.zwo").exists());
    assert!(settings.archive_dir.join("a.txt").exists());
    assert!(settings.archive_dir.join("b.txt").exists());
    assert!(!settings.queue_dir.join("a.txt").exists());
    assert!(settings.queue_dir.join("readme.md").exists());
}

#[test]
fn test_failed_file_stays_in_queue() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    fs::create_dir_all(&settings.queue_dir).unwrap();
    fs::write(settings.queue_dir.join("good.txt"), "5min @ 75% FTP\n").unwrap();
    fs::write(settings.queue_dir.join("bad.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let report = process_queue(&converter, &settings).unwrap();

    assert_eq!(report.converted, vec![settings.queue_dir.join("good.txt")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, settings.queue_dir.join("bad.txt"));

    assert!(settings.queue_dir.join("bad.txt").exists());
    assert!(!settings.output_dir.join("bad.zwo").exists());
    assert!(settings.archive_dir.join("good.txt").exists());
}

#[test]
fn test_oversized_workout_does_not_stop_batch() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    fs::create_dir_all(&settings.queue_dir).unwrap();
    fs::write(settings.queue_dir.join("a.txt"), "4000000000x 30sec @ 100% FTP\n").unwrap();
    fs::write(settings.queue_dir.join("b.txt"), "10min @ 60% FTP\n").unwrap();

    let converter = Converter::new(ConversionRules::default(), None);
    let report = process_queue(&converter, &settings).unwrap();

    assert_eq!(report.converted.len(), 2);
    assert!(report.failed.is_empty());
    let xml = fs::read_to_string(settings.output_dir.join("a.zwo")).unwrap();
    assert!(!xml.contains("IntervalsT"));
    assert!(settings.output_dir.join("b.zwo").exists());
}

#[test]
fn test_empty_or_missing_queue() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings(dir.path());
    let converter = Converter::new(ConversionRules::default(), None);

    // Missing queue directory is not an error.
    let report = process_queue(&converter, &settings).unwrap();
    assert!(report.is_empty());
    assert!(settings.output_dir.is_dir());
    assert!(settings.archive_dir.is_dir());

    fs::create_dir_all(&settings.queue_dir).unwrap();
    let report = process_queue(&converter, &settings).unwrap();
    assert!(report.is_empty());
}

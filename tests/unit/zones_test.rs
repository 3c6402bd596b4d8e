//! Unit tests for zone classification.

use rideforge::metrics::zones::{
    Color, PowerZone, PowerZoneTable, ZoneError, DEFAULT_HIGH_POWER_COLOR, POWER_ZONE_COLORS,
};

#[test]
fn test_default_zone_lookup() {
    let zones = PowerZoneTable::default();

    assert_eq!(zones.classify(0.3).name(), Some("recovery"));
    assert_eq!(zones.classify(0.65).name(), Some("endurance"));
    assert_eq!(zones.classify(0.85).name(), Some("tempo"));
    assert_eq!(zones.classify(1.0).name(), Some("threshold"));
    assert_eq!(zones.classify(1.1).name(), Some("vo2max"));
    assert_eq!(zones.classify(1.5).name(), Some("neuromuscular"));
}

#[test]
fn test_boundaries_belong_to_upper_zone() {
    let zones = PowerZoneTable::default();
    let cases = [
        (0.55, "endurance"),
        (0.75, "tempo"),
        (0.90, "threshold"),
        (1.05, "vo2max"),
        (1.20, "neuromuscular"),
    ];

    for (power, expected) in cases {
        assert_eq!(zones.classify(power).name(), Some(expected), "power {}", power);
    }
}

#[test]
fn test_parsed_percentages_hit_boundaries() {
    // 55 / 100 must land in the same zone as the literal 0.55.
    let zones = PowerZoneTable::default();
    assert_eq!(zones.classify(55.0 / 100.0).name(), Some("endurance"));
    assert_eq!(zones.classify(105.0 / 100.0).name(), Some("vo2max"));
}

#[test]
fn test_zone_colors() {
    let zones = PowerZoneTable::default();
    assert_eq!(zones.classify(0.2).color, POWER_ZONE_COLORS[0]);
    assert_eq!(zones.classify(1.0).color, Color::from_hex("#D0021B").unwrap());
    assert_eq!(zones.classify(2.5).color, DEFAULT_HIGH_POWER_COLOR);
    assert_eq!(zones.classify(2.5).name(), None);
}

#[test]
fn test_table_is_ordered_and_gapless() {
    let zones = PowerZoneTable::default();
    for pair in zones.zones().windows(2) {
        assert_eq!(pair[0].high, pair[1].low);
    }
    assert_eq!(zones.zones().len(), 6);
}

#[test]
fn test_out_of_order_zones_rejected() {
    let result = PowerZoneTable::new(
        vec![
            PowerZone::new("hard", "Hard", 1.0, 2.0, POWER_ZONE_COLORS[3]),
            PowerZone::new("easy", "Easy", 0.0, 1.0, POWER_ZONE_COLORS[0]),
        ],
        DEFAULT_HIGH_POWER_COLOR,
    );
    assert_eq!(result, Err(ZoneError::Overlap("easy".to_string())));
}

//! Power zones and zone colors.
//!
//! Zones only drive chart colors. They have no effect on the .zwo output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// A named half-open power band `[low, high)` as a fraction of FTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerZone {
    /// Stable identifier, e.g. "endurance"
    pub key: String,
    /// Display name used in the chart legend
    pub label: String,
    /// Inclusive lower bound
    pub low: f64,
    /// Exclusive upper bound
    pub high: f64,
    /// Display color
    pub color: Color,
}

impl PowerZone {
    pub fn new(key: &str, label: &str, low: f64, high: f64, color: Color) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            low,
            high,
            color,
        }
    }

    pub fn contains(&self, power: f64) -> bool {
        self.low <= power && power < self.high
    }

    /// Legend text such as `Tempo (75-90%)` or `Neuromuscular (120+%)`.
    pub fn legend_label(&self, open_top: bool) -> String {
        let low = (self.low * 100.0).round() as i64;
        if open_top {
            format!("{} ({}+%)", self.label, low)
        } else {
            let high = (self.high * 100.0).round() as i64;
            format!("{} ({}-{}%)", self.label, low, high)
        }
    }
}

/// Result of a zone lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMatch<'a> {
    /// Matching zone, `None` above the highest band
    pub zone: Option<&'a PowerZone>,
    pub color: Color,
}

impl ZoneMatch<'_> {
    pub fn name(&self) -> Option<&str> {
        self.zone.map(|z| z.key.as_str())
    }
}

/// Errors in a zone table definition.
#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("Zone table is empty")]
    Empty,

    #[error("Zone '{0}' has an empty or inverted range")]
    InvalidRange(String),

    #[error("Zone '{0}' overlaps or is out of order with the previous zone")]
    Overlap(String),
}

/// Ordered, non-overlapping power zones with a fallback color.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerZoneTable {
    zones: Vec<PowerZone>,
    high_power_color: Color,
}

impl PowerZoneTable {
    /// Build a table, checking that bands are ordered and do not overlap.
    pub fn new(zones: Vec<PowerZone>, high_power_color: Color) -> Result<Self, ZoneError> {
        if zones.is_empty() {
            return Err(ZoneError::Empty);
        }

        for zone in &zones {
            if zone.low.partial_cmp(&zone.high) != Some(std::cmp::Ordering::Less) {
                return Err(ZoneError::InvalidRange(zone.key.clone()));
            }
        }

        for pair in zones.windows(2) {
            if pair[1].low < pair[0].high {
                return Err(ZoneError::Overlap(pair[1].key.clone()));
            }
        }

        Ok(Self {
            zones,
            high_power_color,
        })
    }

    /// Find the zone and color for a power fraction. Never fails.
    pub fn classify(&self, power: f64) -> ZoneMatch<'_> {
        match self.zones.iter().find(|z| z.contains(power)) {
            Some(zone) => ZoneMatch {
                zone: Some(zone),
                color: zone.color,
            },
            None => ZoneMatch {
                zone: None,
                color: self.high_power_color,
            },
        }
    }

    pub fn zones(&self) -> &[PowerZone] {
        &self.zones
    }

    /// Legend entries in zone order. The top zone is shown as open-ended
    /// (`120+`) when it reaches `open_top_at` or beyond.
    pub fn legend(&self, open_top_at: f64) -> Vec<(String, Color)> {
        self.zones
            .iter()
            .map(|z| {
                let open_top = z.high >= open_top_at;
                (z.legend_label(open_top), z.color)
            })
            .collect()
    }
}

impl Default for PowerZoneTable {
    fn default() -> Self {
        Self {
            zones: default_power_zones(),
            high_power_color: DEFAULT_HIGH_POWER_COLOR,
        }
    }
}

/// Color for power above the top zone.
pub const DEFAULT_HIGH_POWER_COLOR: Color = Color::new(0x50, 0xE3, 0xC2);

/// Default zone colors, recovery to neuromuscular.
pub const POWER_ZONE_COLORS: [Color; 6] = [
    Color::new(0x4A, 0x90, 0xE2), // Blue (Recovery)
    Color::new(0x7E, 0xD3, 0x21), // Green (Endurance)
    Color::new(0xF5, 0xA6, 0x23), // Orange (Tempo)
    Color::new(0xD0, 0x02, 0x1B), // Red (Threshold)
    Color::new(0x90, 0x13, 0xFE), // Violet (VO2Max)
    Color::new(0xBD, 0x10, 0xE0), // Magenta (Neuromuscular)
];

/// The six default training zones.
pub fn default_power_zones() -> Vec<PowerZone> {
    vec![
        PowerZone::new("recovery", "Recovery", 0.0, 0.55, POWER_ZONE_COLORS[0]),
        PowerZone::new("endurance", "Endurance", 0.55, 0.75, POWER_ZONE_COLORS[1]),
        PowerZone::new("tempo", "Tempo", 0.75, 0.90, POWER_ZONE_COLORS[2]),
        PowerZone::new("threshold", "Threshold", 0.90, 1.05, POWER_ZONE_COLORS[3]),
        PowerZone::new("vo2max", "VO2Max", 1.05, 1.20, POWER_ZONE_COLORS[4]),
        PowerZone::new("neuromuscular", "Neuromuscular", 1.20, 2.0, POWER_ZONE_COLORS[5]),
    ]
}

//! Application configuration.
//!
//! Loaded from TOML. Every section is optional and falls back to defaults, so
//! an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metrics::zones::{
    default_power_zones, Color, PowerZone, PowerZoneTable, DEFAULT_HIGH_POWER_COLOR,
};
use crate::workouts::types::ConversionRules;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Text-to-segment rules
    pub rules: ConversionRules,
    /// Chart settings
    pub chart: ChartSettings,
    /// Batch mode directories
    pub queue: QueueSettings,
    /// Chart zone colors
    pub zones: ZoneSettings,
}

impl AppConfig {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.ramp_step_seconds == 0 {
            return Err(ConfigError::Invalid(
                "rules.ramp_step_seconds must be greater than zero".to_string(),
            ));
        }
        if self.rules.max_segment_seconds == 0 || self.rules.max_repeat == 0 {
            return Err(ConfigError::Invalid(
                "rules.max_segment_seconds and rules.max_repeat must be greater than zero"
                    .to_string(),
            ));
        }
        for (name, power) in [
            ("default_power", self.rules.default_power),
            ("interval_off_power", self.rules.interval_off_power),
            ("free_ride_display_power", self.rules.free_ride_display_power),
        ] {
            if !(power.is_finite() && power >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "rules.{} must be a non-negative number",
                    name
                )));
            }
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::Invalid(
                "chart.width and chart.height must be greater than zero".to_string(),
            ));
        }
        if !(self.chart.max_power.is_finite() && self.chart.max_power > 0.0) {
            return Err(ConfigError::Invalid(
                "chart.max_power must be greater than zero".to_string(),
            ));
        }
        self.zone_table()?;
        Ok(())
    }

    /// Build the validated zone lookup table.
    pub fn zone_table(&self) -> Result<PowerZoneTable, ConfigError> {
        PowerZoneTable::new(self.zones.bands.clone(), self.zones.high_power_color)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Chart-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Render a PNG chart next to each .zwo file
    pub enabled: bool,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Top of the power axis as a fraction of FTP
    pub max_power: f64,
    /// Workouts longer than this use the long tick interval
    pub long_workout_seconds: u32,
    /// Tick interval for short workouts
    pub short_tick_seconds: u32,
    /// Tick interval for long workouts
    pub long_tick_seconds: u32,
    /// Zones reaching this power are shown as open-ended in the legend
    pub legend_open_top_at: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1800,
            height: 900,
            max_power: 1.5,
            long_workout_seconds: 600,
            short_tick_seconds: 60,
            long_tick_seconds: 300,
            legend_open_top_at: 2.0,
        }
    }
}

/// Batch mode directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    /// Pending .txt workouts
    pub queue_dir: PathBuf,
    /// Generated .zwo and .png files
    pub output_dir: PathBuf,
    /// Processed .txt workouts
    pub archive_dir: PathBuf,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            queue_dir: PathBuf::from("./queue"),
            output_dir: PathBuf::from("./zwo"),
            archive_dir: PathBuf::from("./txt"),
        }
    }
}

/// Zone bands used for chart colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    /// Color for power above the top band
    pub high_power_color: Color,
    /// Bands in ascending order
    pub bands: Vec<PowerZone>,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            high_power_color: DEFAULT_HIGH_POWER_COLOR,
            bands: default_power_zones(),
        }
    }
}

/// Get the per-user configuration file path.
pub fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "rideforge", "RideForge")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("rideforge.toml"))
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the per-user file is used when
/// present and defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default_path = get_config_path();
            if !default_path.exists() {
                return Ok(AppConfig::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    tracing::debug!("Loaded configuration from {}", path.display());
    parse_config(&content)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

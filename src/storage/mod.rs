//! Configuration loading.

pub mod config;

pub use config::{
    get_config_path, load_config, parse_config, AppConfig, ChartSettings, ConfigError,
    QueueSettings, ZoneSettings,
};

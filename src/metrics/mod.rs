//! Power zones used to color workout charts.

pub mod zones;

pub use zones::{default_power_zones, Color, PowerZone, PowerZoneTable, ZoneError, ZoneMatch};

//! Workout chart rendering: power over time, colored by zone.

pub mod model;
pub mod raster;
pub mod svg;

pub use model::{build_chart, AxisTick, BarStyle, ChartBar, ChartModel, LegendEntry};
pub use raster::{ChartError, ChartRenderer};
pub use svg::render_svg;

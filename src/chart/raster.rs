//! PNG output for workout charts.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chart::model::build_chart;
use crate::chart::svg::render_svg;
use crate::metrics::zones::PowerZoneTable;
use crate::storage::config::ChartSettings;
use crate::workouts::types::WorkoutDocument;

/// Errors while producing a chart image.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid chart SVG: {0}")]
    Svg(String),

    #[error("Failed to allocate a {width}x{height} image")]
    Allocation { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders workout charts to PNG.
///
/// System fonts are loaded once when the renderer is created.
pub struct ChartRenderer {
    options: usvg::Options<'static>,
    settings: ChartSettings,
    zones: PowerZoneTable,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings, zones: PowerZoneTable) -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(faces = options.fontdb.len(), "Loaded chart fonts");

        Self {
            options,
            settings,
            zones,
        }
    }

    /// Build the SVG for a document.
    pub fn render_svg(&self, doc: &WorkoutDocument) -> String {
        let chart = build_chart(doc, &self.zones, &self.settings);
        render_svg(&chart, &self.settings)
    }

    /// Rasterize a document's chart to an RGBA image.
    pub fn render_image(&self, doc: &WorkoutDocument) -> Result<image::RgbaImage, ChartError> {
        let svg = self.render_svg(doc);
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .map_err(|e| ChartError::Svg(e.to_string()))?;

        let (width, height) = (self.settings.width, self.settings.height);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or(ChartError::Allocation { width, height })?;
        pixmap.fill(resvg::tiny_skia::Color::WHITE);

        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // The background is opaque, so premultiplied and straight alpha agree.
        image::RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or(ChartError::Allocation { width, height })
    }

    /// Write `{output_dir}/{name}.png` and return its path.
    pub fn render_to_dir(
        &self,
        doc: &WorkoutDocument,
        output_dir: &Path,
    ) -> Result<PathBuf, ChartError> {
        let image = self.render_image(doc)?;
        let path = output_dir.join(format!("{}.png", doc.name));
        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }
}

//! Conversion of one text workout into a .zwo file and a chart.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chart::ChartRenderer;
use crate::storage::config::{AppConfig, ConfigError};
use crate::workouts::classifier::parse_workout;
use crate::workouts::types::{ConversionRules, WorkoutDocument};
use crate::workouts::zwo_writer::{write_zwo, ZwoWriteError};

/// Required extension of workout input files.
pub const INPUT_EXTENSION: &str = "txt";
/// Extension of generated workout files.
pub const OUTPUT_EXTENSION: &str = "zwo";

/// Errors converting a workout file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Workout file '{0}' not found")]
    NotFound(PathBuf),

    #[error("Expected .txt file, got '{0}'")]
    WrongExtension(String),

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build workout file: {0}")]
    Serialize(#[from] ZwoWriteError),
}

/// Files produced for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub zwo_path: PathBuf,
    /// `None` when charts are disabled or rendering failed
    pub chart_path: Option<PathBuf>,
}

/// Check that the input exists and is a .txt file.
pub fn validate_workout_file(path: &Path) -> Result<(), ConvertError> {
    if !path.exists() {
        return Err(ConvertError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    if !extension.eq_ignore_ascii_case(INPUT_EXTENSION) {
        let shown = if extension.is_empty() {
            String::new()
        } else {
            format!(".{}", extension)
        };
        return Err(ConvertError::WrongExtension(shown));
    }

    Ok(())
}

/// Workout name shown in the .zwo file and chart: the input file stem.
pub fn workout_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "workout".to_string())
}

/// Converts workout files with one set of rules and one chart renderer.
pub struct Converter {
    rules: ConversionRules,
    chart: Option<ChartRenderer>,
}

impl Converter {
    pub fn new(rules: ConversionRules, chart: Option<ChartRenderer>) -> Self {
        Self { rules, chart }
    }

    /// Build a converter from configuration. Charts follow `chart.enabled`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let chart = if config.chart.enabled {
            Some(ChartRenderer::new(config.chart.clone(), config.zone_table()?))
        } else {
            None
        };
        Ok(Self::new(config.rules.clone(), chart))
    }

    /// Read a text workout into its canonical document.
    pub fn read_document(&self, path: &Path) -> Result<WorkoutDocument, ConvertError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parse_workout(&workout_name(path), content.lines(), &self.rules))
    }

    /// Convert one file, writing `{name}.zwo` (and `{name}.png`) to `output_dir`.
    ///
    /// A chart failure is logged and does not fail the conversion.
    pub fn convert_file(
        &self,
        path: &Path,
        output_dir: &Path,
    ) -> Result<ConversionOutput, ConvertError> {
        let doc = self.read_document(path)?;
        if doc.is_empty() {
            tracing::warn!("No workout segments recognised in {}", path.display());
        }

        let xml = write_zwo(&doc)?;
        let zwo_path = output_dir.join(format!("{}.{}", doc.name, OUTPUT_EXTENSION));
        std::fs::write(&zwo_path, xml).map_err(|source| ConvertError::Write {
            path: zwo_path.clone(),
            source,
        })?;

        let chart_path = self.chart.as_ref().and_then(|renderer| {
            match renderer.render_to_dir(&doc, output_dir) {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Could not generate chart for {}: {}", doc.name, e);
                    None
                }
            }
        });

        Ok(ConversionOutput {
            zwo_path,
            chart_path,
        })
    }
}

/// Output directory for single-file mode: the input's own directory.
pub fn single_file_output_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Validate and convert one file next to itself.
pub fn process_single_file(
    converter: &Converter,
    path: &Path,
) -> Result<ConversionOutput, ConvertError> {
    validate_workout_file(path)?;
    let output_dir = single_file_output_dir(path);

    tracing::info!("Processing: {}", path.display());
    let output = converter.convert_file(path, &output_dir)?;

    tracing::info!("Created: {}", output.zwo_path.display());
    if let Some(chart) = &output.chart_path {
        tracing::info!("Generated: {}", chart.display());
    }
    Ok(output)
}

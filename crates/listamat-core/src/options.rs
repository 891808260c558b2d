use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ListamatError;

/// Tuning for the extraction pipeline. Every section falls back to its
/// defaults when missing from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub detector: DetectorConfig,
    pub line_parser: LineParserConfig,
    pub text: TextConfig,
}

/// Geometry thresholds for the structured table detector, in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Words whose vertical centres differ by at most this much share a line.
    pub line_tolerance: f32,
    /// A horizontal gap wider than this starts a new cell.
    pub cell_gap: f32,
    /// Lines with fewer cells than this do not belong to a table.
    pub min_columns: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            line_tolerance: 2.0,
            cell_gap: 6.0,
            min_columns: 3,
        }
    }
}

/// Marker phrases delimiting the material list in page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParserConfig {
    /// All of these must appear on one line to open the table.
    pub start_markers: Vec<String>,
    /// A line containing this closes the table.
    pub end_marker: String,
}

impl Default for LineParserConfig {
    fn default() -> Self {
        LineParserConfig {
            start_markers: vec!["LISTA DE MATERIAIS".into(), "MACROMEDIDOR".into()],
            end_marker: "NOTAS".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Keep the physical column layout when extracting page text.
    pub layout: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig { layout: true }
    }
}

/// Load options from a JSON file.
pub fn load_options(path: &Path) -> Result<ExtractOptions, ListamatError> {
    let content = std::fs::read_to_string(path).map_err(|e| ListamatError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_options(&content, path)
}

/// Parse options from a JSON string.
pub fn parse_options(json: &str, source: &Path) -> Result<ExtractOptions, ListamatError> {
    let options: ExtractOptions =
        serde_json::from_str(json).map_err(|e| ListamatError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

pub fn validate_options(options: &ExtractOptions) -> Result<(), ListamatError> {
    let detector = &options.detector;
    if !(detector.line_tolerance >= 0.0) {
        return Err(ListamatError::ConfigInvalid(
            "detector.line_tolerance must be a non-negative number".into(),
        ));
    }
    if !(detector.cell_gap > 0.0) {
        return Err(ListamatError::ConfigInvalid(
            "detector.cell_gap must be positive".into(),
        ));
    }
    if detector.min_columns < 2 {
        return Err(ListamatError::ConfigInvalid(format!(
            "detector.min_columns must be at least 2, got {}",
            detector.min_columns
        )));
    }

    let parser = &options.line_parser;
    if parser.start_markers.is_empty() || parser.start_markers.iter().any(|m| m.trim().is_empty())
    {
        return Err(ListamatError::ConfigInvalid(
            "line_parser.start_markers must contain non-empty phrases".into(),
        ));
    }
    if parser.end_marker.trim().is_empty() {
        return Err(ListamatError::ConfigInvalid(
            "line_parser.end_marker must not be empty".into(),
        ));
    }

    Ok(())
}

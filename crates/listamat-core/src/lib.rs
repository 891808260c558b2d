pub mod document;
pub mod error;
pub mod export;
pub mod extraction;
pub mod line_parser;
pub mod model;
pub mod options;
pub mod structured;

use document::Document;
use error::ListamatError;
use extraction::bbox_table::PdftotextTableDetector;
use extraction::pdftotext::PdftotextExtractor;
use extraction::{PdfExtractor, TableDetector};
use model::{Dataset, ExtractionStage};
use options::ExtractOptions;

/// Main API entry point: extract the material list from PDF bytes using
/// the poppler backends and default options.
///
/// An empty dataset means no material list was found.
pub fn extract_pdf(pdf_bytes: &[u8]) -> Result<Dataset, ListamatError> {
    let document = Document::from_bytes(pdf_bytes);
    let options = ExtractOptions::default();
    extract_with_options(&document, &options)
}

/// Extract with the poppler backends configured from `options`.
pub fn extract_with_options(
    document: &Document,
    options: &ExtractOptions,
) -> Result<Dataset, ListamatError> {
    let detector = PdftotextTableDetector::new(options.detector.clone());
    let extractor = PdftotextExtractor::with_layout(options.text.layout);
    extract_dataset(document, &detector, &extractor, options)
}

/// Try structured table detection first and fall back to parsing page text
/// when it finds no item rows. Results of the two stages are never merged.
pub fn extract_dataset(
    document: &Document,
    detector: &dyn TableDetector,
    extractor: &dyn PdfExtractor,
    options: &ExtractOptions,
) -> Result<Dataset, ListamatError> {
    let rows = structured::extract_rows(document.bytes(), detector)?;
    if !rows.is_empty() {
        tracing::info!(
            rows = rows.len(),
            backend = detector.backend_name(),
            "material list read from structured tables"
        );
        return Dataset::assemble(ExtractionStage::Structured, rows);
    }

    tracing::info!("no structured table rows, parsing page text");
    let rows = line_parser::extract_rows(document.bytes(), extractor, &options.line_parser)?;
    if rows.is_empty() {
        tracing::info!("no material list found");
    } else {
        tracing::info!(rows = rows.len(), "material list read from page text");
    }
    Dataset::assemble(ExtractionStage::LineParser, rows)
}

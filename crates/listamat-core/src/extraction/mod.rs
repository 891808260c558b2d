pub mod bbox_table;
pub mod pdftotext;
pub mod poppler;

use crate::error::ListamatError;

/// Text content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ListamatError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// A table found by a structured detector. Cells the detector could not
/// fill are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateTable {
    pub rows: Vec<Vec<Option<String>>>,
}

/// Detector output for one page. A failed page carries its own error so
/// the remaining pages can still be used.
#[derive(Debug)]
pub struct PageTables {
    pub page_number: usize,
    pub tables: Result<Vec<CandidateTable>, ListamatError>,
}

/// Trait for structured table detection backends.
pub trait TableDetector: Send + Sync {
    /// Detect candidate tables on every page, in page order.
    ///
    /// An `Err` here means the document as a whole could not be read.
    fn detect_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, ListamatError>;

    /// Name of this detection backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

use crate::error::ListamatError;
use crate::extraction::poppler::{self, PDFTOTEXT};
use crate::extraction::{PageContent, PdfExtractor};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// With `layout` set, uses `pdftotext -layout` so that every table row
/// stays on one physical line.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: true }
    }

    pub fn with_layout(layout: bool) -> Self {
        PdftotextExtractor { layout }
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ListamatError> {
        let tmpfile = poppler::write_temp_pdf(pdf_bytes)?;

        let args: &[&str] = if self.layout {
            &["-enc", "UTF-8", "-layout"]
        } else {
            &["-enc", "UTF-8"]
        };
        let stdout = poppler::run_tool(PDFTOTEXT, args, tmpfile.path())?;
        let text = String::from_utf8_lossy(&stdout);

        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed `\x0c` separates pages).
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut pages: Vec<PageContent> = text
        .split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .collect();

    // pdftotext terminates the last page with a form feed too.
    if pages.len() > 1 && pages.last().is_some_and(|p| p.lines.is_empty()) {
        pages.pop();
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages() {
        let text = "CARIMBO\nLISTA DE MATERIAIS\x0c1 TUBO PVC 6 M\nNOTAS\n\x0c";
        let pages = split_pages(text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].lines, vec!["CARIMBO", "LISTA DE MATERIAIS"]);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].lines, vec!["1 TUBO PVC 6 M", "NOTAS"]);
    }

    #[test]
    fn blank_pages_in_the_middle_are_kept() {
        let pages = split_pages("a\x0c\x0cb\x0c");
        assert_eq!(pages.len(), 3);
        assert!(pages[1].lines.is_empty());
        assert_eq!(pages[2].lines, vec!["b"]);
    }

    #[test]
    fn backend_name_is_pdftotext() {
        assert_eq!(PdftotextExtractor::default().backend_name(), "pdftotext");
        assert!(!PdftotextExtractor::with_layout(false).layout);
    }
}

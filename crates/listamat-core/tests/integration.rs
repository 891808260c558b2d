//! Integration tests for extract_dataset() end-to-end pipeline.
//!
//! Uses mock backends that return pre-built tables and page text without
//! invoking poppler, so these tests run without poppler-utils.

use std::sync::atomic::{AtomicUsize, Ordering};

use listamat_core::document::Document;
use listamat_core::error::ListamatError;
use listamat_core::export::{export_file_name, to_xlsx};
use listamat_core::extract_dataset;
use listamat_core::extraction::{
    CandidateTable, PageContent, PageTables, PdfExtractor, TableDetector,
};
use listamat_core::model::{Dataset, ExtractionStage, COLUMNS};
use listamat_core::options::ExtractOptions;

struct MockDetector {
    pages: Vec<Vec<CandidateTable>>,
    seen: std::sync::Mutex<Vec<Vec<u8>>>,
}

impl MockDetector {
    fn new(pages: Vec<Vec<CandidateTable>>) -> Self {
        MockDetector {
            pages,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self::new(vec![vec![]])
    }
}

impl TableDetector for MockDetector {
    fn detect_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, ListamatError> {
        self.seen.lock().unwrap().push(pdf_bytes.to_vec());
        Ok(self
            .pages
            .iter()
            .enumerate()
            .map(|(i, tables)| PageTables {
                page_number: i + 1,
                tables: Ok(tables.clone()),
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock-tables"
    }
}

struct MockExtractor {
    pages: Vec<PageContent>,
    calls: AtomicUsize,
}

impl MockExtractor {
    fn new(pages: Vec<PageContent>) -> Self {
        MockExtractor {
            pages,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ListamatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock-text"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn table(rows: &[&[&str]]) -> CandidateTable {
    CandidateTable {
        rows: rows
            .iter()
            .map(|r| {
                r.iter()
                    .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                    .collect()
            })
            .collect(),
    }
}

fn document() -> Document {
    Document::from_bytes(b"%PDF-1.5 test document".to_vec()).with_name("MM-02.pdf")
}

fn run(detector: &MockDetector, extractor: &MockExtractor) -> Dataset {
    extract_dataset(&document(), detector, extractor, &ExtractOptions::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Text fallback: one item between the list title and the notes block
// ---------------------------------------------------------------------------
#[test]
fn text_fallback_single_item() {
    let extractor = MockExtractor::new(vec![page(
        1,
        &[
            "LISTA DE MATERIAIS MACROMEDIDOR",
            "1 VALVULA GAVETA FO-FO 2 UN 50 50 200",
            "NOTAS",
        ],
    )]);

    let dataset = run(&MockDetector::empty(), &extractor);

    assert_eq!(dataset.source, Some(ExtractionStage::LineParser));
    assert_eq!(dataset.len(), 1);
    assert_eq!(
        dataset.rows[0].fields(),
        ["1", "VALVULA GAVETA FO-FO UN", "2", "50", "50", "200", "", ""]
    );
}

// ---------------------------------------------------------------------------
// Structured tables: only rows with an item number are kept
// ---------------------------------------------------------------------------
#[test]
fn structured_rows_filtered_by_item_number() {
    let detector = MockDetector::new(vec![vec![table(&[
        &["ITEM", "DESCRIÇÃO", "MATERIAL", "QUANT.", "UND.", "DN (mm)", "dn (mm)", "L (mm)"],
        &["1", "HIDRÔMETRO WOLTMANN", "", "1", "PÇ", "50", "", "200"],
        &["2", "TUBO", "PVC", "6", "M", "50"],
        &["X", "OBSERVAÇÃO", "", "", "", "", "", ""],
    ])]]);
    let extractor = MockExtractor::new(vec![]);

    let dataset = run(&detector, &extractor);

    assert_eq!(dataset.source, Some(ExtractionStage::Structured));
    let items: Vec<&str> = dataset.rows.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(items, vec!["1", "2"]);
    assert_eq!(dataset.rows[0].material, "");
    assert_eq!(dataset.rows[1].outer_diameter, "50");
    assert_eq!(dataset.rows[1].length, "");
    // text stage never runs once tables produced rows
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Wrapped description lines are joined with a space
// ---------------------------------------------------------------------------
#[test]
fn wrapped_description_is_joined() {
    let extractor = MockExtractor::new(vec![page(
        1,
        &[
            "LISTA DE MATERIAIS - MACROMEDIDOR",
            "1 CURVA 90 PVC-PBA 2 50",
            "SOLDAVEL",
            "NOTAS",
        ],
    )]);

    let dataset = run(&MockDetector::empty(), &extractor);

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.rows[0].description, "CURVA PVC-PBA SOLDAVEL");
    assert_eq!(dataset.rows[0].material, "90");
}

// ---------------------------------------------------------------------------
// Nothing recognisable: empty dataset, header still available
// ---------------------------------------------------------------------------
#[test]
fn nothing_found_gives_empty_dataset() {
    let extractor = MockExtractor::new(vec![page(
        1,
        &["PLANTA BAIXA", "1 TUBO PVC 6 50", "NOTAS"],
    )]);

    let dataset = run(&MockDetector::empty(), &extractor);

    assert!(dataset.is_empty());
    assert_eq!(dataset.source, None);
    assert_eq!(dataset.columns(), &COLUMNS);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Both stages read the same bytes from the start
// ---------------------------------------------------------------------------
#[test]
fn repeated_runs_are_identical() {
    let detector = MockDetector::new(vec![vec![table(&[&["1", "TE", "FOFO"]])]]);
    let extractor = MockExtractor::new(vec![]);
    let doc = document();
    let options = ExtractOptions::default();

    let first = extract_dataset(&doc, &detector, &extractor, &options).unwrap();
    let second = extract_dataset(&doc, &detector, &extractor, &options).unwrap();

    assert_eq!(first, second);
    let seen = detector.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], doc.bytes());
    assert_eq!(seen[1], doc.bytes());
}

// ---------------------------------------------------------------------------
// A table row wider than the schema is reported, not truncated
// ---------------------------------------------------------------------------
#[test]
fn too_wide_structured_row_is_an_error() {
    let detector = MockDetector::new(vec![vec![table(&[&[
        "3", "LUVA", "PVC", "2", "PÇ", "50", "", "100", "EXTRA",
    ]])]]);
    let extractor = MockExtractor::new(vec![]);

    let err = extract_dataset(&document(), &detector, &extractor, &ExtractOptions::default())
        .unwrap_err();

    assert!(matches!(err, ListamatError::RowTooWide { width: 9, .. }));
}

// ---------------------------------------------------------------------------
// Text stage failures surface as errors
// ---------------------------------------------------------------------------
#[test]
fn text_backend_failure_propagates() {
    struct Broken;
    impl PdfExtractor for Broken {
        fn extract_pages(&self, _: &[u8]) -> Result<Vec<PageContent>, ListamatError> {
            Err(ListamatError::ToolNotFound { tool: "pdftotext" })
        }
        fn backend_name(&self) -> &str {
            "broken"
        }
    }

    let err = extract_dataset(
        &document(),
        &MockDetector::empty(),
        &Broken,
        &ExtractOptions::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("pdftotext not found"));
}

// ---------------------------------------------------------------------------
// Multi-page drawing exported under the document's name
// ---------------------------------------------------------------------------
#[test]
fn multi_page_text_exports_to_xlsx() {
    let extractor = MockExtractor::new(vec![
        page(
            1,
            &[
                "PROJETO EXECUTIVO",
                "LISTA DE MATERIAIS MACROMEDIDOR",
                "1 HIDROMETRO WOLTMANN 1 PC 50",
                "2 FILTRO Y FOFO 1 PC 50",
            ],
        ),
        page(
            2,
            &["3 JUNTA DE DESMONTAGEM 1 PC 50", "4 TUBO PVC 2 M 50 6000", "NOTAS"],
        ),
    ]);

    let doc = document();
    let dataset = extract_dataset(
        &doc,
        &MockDetector::empty(),
        &extractor,
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.rows[2].description, "JUNTA DE DESMONTAGEM PC");
    assert_eq!(dataset.rows[3].fields()[4], "6000");

    let bytes = to_xlsx(&dataset).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert_eq!(export_file_name(doc.name()), "MM-02.xlsx");
}

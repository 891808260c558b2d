use crate::error::ListamatError;
use crate::extraction::{CandidateTable, TableDetector};

/// Collect material list rows from the tables a structured detector finds.
///
/// Only rows whose first cell holds an item number are kept. Pages the
/// detector fails on are skipped; the remaining pages are still used.
pub fn extract_rows(
    pdf_bytes: &[u8],
    detector: &dyn TableDetector,
) -> Result<Vec<Vec<String>>, ListamatError> {
    let pages = detector.detect_tables(pdf_bytes)?;

    let mut rows = Vec::new();
    for page in pages {
        let tables = match page.tables {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!(
                    page = page.page_number,
                    backend = detector.backend_name(),
                    "skipping page: {e}"
                );
                continue;
            }
        };

        let before = rows.len();
        rows.extend(admitted_rows(tables));
        tracing::debug!(
            page = page.page_number,
            admitted = rows.len() - before,
            "structured tables scanned"
        );
    }

    Ok(rows)
}

fn admitted_rows(tables: Vec<CandidateTable>) -> impl Iterator<Item = Vec<String>> {
    tables
        .into_iter()
        .flat_map(|table| table.rows)
        .filter(|row| is_item_row(row))
        .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
}

/// A row belongs to the material list when its first cell is an item number.
pub fn is_item_row(row: &[Option<String>]) -> bool {
    match row.first() {
        Some(Some(cell)) => is_item_number(cell.trim()),
        _ => false,
    }
}

/// Non-empty and made of decimal digits only.
pub fn is_item_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

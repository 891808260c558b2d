use listamat_core::document::Document;
use listamat_core::error::ListamatError;
use listamat_core::export::{export_file_name, to_xlsx};
use std::path::{Path, PathBuf};

use super::Outcome;

pub fn run(
    pdf_file: &Path,
    out: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<Outcome, ListamatError> {
    let options = super::load_options(config)?;
    let document = Document::open(pdf_file)?;
    let dataset = listamat_core::extract_with_options(&document, &options)?;

    if dataset.is_empty() {
        return Ok(Outcome::Empty);
    }

    let path = out.unwrap_or_else(|| pdf_file.with_file_name(export_file_name(document.name())));

    let bytes = to_xlsx(&dataset)?;
    std::fs::write(&path, bytes)?;
    eprintln!(
        "Extracted {} item(s) from {}, written to {}",
        dataset.len(),
        dataset
            .source
            .map(|s| s.to_string())
            .unwrap_or_default(),
        path.display()
    );

    Ok(Outcome::Found)
}

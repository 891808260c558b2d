use listamat_core::document::Document;
use listamat_core::error::ListamatError;
use std::path::Path;

use super::Outcome;
use crate::output;

pub fn run(
    pdf_file: &Path,
    output_format: &str,
    config: Option<&Path>,
) -> Result<Outcome, ListamatError> {
    let options = super::load_options(config)?;
    let document = Document::open(pdf_file)?;
    let dataset = listamat_core::extract_with_options(&document, &options)?;

    if dataset.is_empty() {
        return Ok(Outcome::Empty);
    }

    match output_format {
        "json" => output::json::print(&dataset)?,
        _ => output::table::print(&dataset),
    }

    Ok(Outcome::Found)
}

pub mod config;
pub mod export;
pub mod extract;

use listamat_core::error::ListamatError;
use listamat_core::options::{self, ExtractOptions};
use std::path::Path;

/// Whether a command found a material list to show or save.
pub enum Outcome {
    Found,
    Empty,
}

/// Options from `--config`, or the defaults.
pub fn load_options(config: Option<&Path>) -> Result<ExtractOptions, ListamatError> {
    match config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading extraction options");
            options::load_options(path)
        }
        None => Ok(ExtractOptions::default()),
    }
}

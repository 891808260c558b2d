use listamat_core::error::ListamatError;
use listamat_core::options::ExtractOptions;

use super::Outcome;

pub fn run() -> Result<Outcome, ListamatError> {
    let json = serde_json::to_string_pretty(&ExtractOptions::default())?;
    println!("{json}");
    Ok(Outcome::Found)
}

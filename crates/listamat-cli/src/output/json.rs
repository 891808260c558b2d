use listamat_core::error::ListamatError;
use listamat_core::model::Dataset;

pub fn print(dataset: &Dataset) -> Result<(), ListamatError> {
    let json = serde_json::to_string_pretty(dataset)?;
    println!("{json}");
    Ok(())
}

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

use crate::error::ListamatError;
use crate::model::{Dataset, COLUMNS};

pub const SHEET_NAME: &str = "Lista de Materiais";
pub const HEADER_COLOR: u32 = 0x9FCF7C;
pub const COLUMN_WIDTH: f64 = 20.0;

const DEFAULT_STEM: &str = "lista_de_materiais";

/// Render the dataset as an xlsx workbook and return its bytes.
///
/// The header row is bold, bordered and highlighted; data cells are
/// bordered; all cells are centred and every column has the same width.
pub fn to_xlsx(dataset: &Dataset) -> Result<Vec<u8>, ListamatError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let cell_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (i, row) in dataset.rows.iter().enumerate() {
        let row_num = i as u32 + 1;
        for (col, value) in row.fields().iter().enumerate() {
            worksheet.write_string_with_format(row_num, col as u16, *value, &cell_format)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = dataset.len(), size = bytes.len(), "xlsx workbook written");
    Ok(bytes)
}

/// Download name for the exported workbook: the document's base name with
/// `.pdf` replaced by `.xlsx`.
pub fn export_file_name(document_name: Option<&str>) -> String {
    let stem = document_name
        .map(Path::new)
        .and_then(|path| {
            let file_name = path.file_name()?.to_str()?;
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            match (is_pdf, path.file_stem().and_then(|s| s.to_str())) {
                (true, Some(stem)) => Some(stem),
                _ => Some(file_name),
            }
        })
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or(DEFAULT_STEM);

    format!("{stem}.xlsx")
}

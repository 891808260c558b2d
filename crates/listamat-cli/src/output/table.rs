use listamat_core::model::{Dataset, COLUMNS, COLUMN_COUNT};

pub fn print(dataset: &Dataset) {
    if let Some(source) = dataset.source {
        println!("=== Lista de Materiais ({} item(s), from {source}) ===\n", dataset.len());
    }
    print!("{}", format_dataset(dataset));
}

/// Render the dataset as left-aligned columns sized to their widest cell.
pub fn format_dataset(dataset: &Dataset) -> String {
    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in &dataset.rows {
        for (width, value) in widths.iter_mut().zip(row.fields()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: [&str; COLUMN_COUNT] = std::array::from_fn(|i| rule[i].as_str());
    push_line(&mut out, rule, &widths);
    for row in &dataset.rows {
        push_line(&mut out, row.fields(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; COLUMN_COUNT], widths: &[usize; COLUMN_COUNT]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

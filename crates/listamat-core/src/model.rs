use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ListamatError;

/// Header of the material list, in column order.
pub const COLUMNS: [&str; 8] = [
    "ITEM",
    "DESCRIÇÃO",
    "MATERIAL",
    "QUANT.",
    "UND.",
    "DN (mm)",
    "dn (mm)",
    "L (mm)",
];

pub const COLUMN_COUNT: usize = COLUMNS.len();

/// One line of the material list. Every field is kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "ITEM")]
    pub item: String,
    #[serde(rename = "DESCRIÇÃO")]
    pub description: String,
    #[serde(rename = "MATERIAL")]
    pub material: String,
    #[serde(rename = "QUANT.")]
    pub quantity: String,
    #[serde(rename = "UND.")]
    pub unit: String,
    #[serde(rename = "DN (mm)")]
    pub outer_diameter: String,
    #[serde(rename = "dn (mm)")]
    pub inner_diameter: String,
    #[serde(rename = "L (mm)")]
    pub length: String,
}

impl Row {
    /// Build a row from positional fields.
    ///
    /// Short input is padded with empty strings. Input wider than the
    /// schema is rejected rather than truncated.
    pub fn from_fields(fields: Vec<String>) -> Result<Row, ListamatError> {
        if fields.len() > COLUMN_COUNT {
            return Err(ListamatError::RowTooWide {
                item: fields.first().cloned().unwrap_or_default(),
                width: fields.len(),
            });
        }

        let mut it = fields.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Ok(Row {
            item: next(),
            description: next(),
            material: next(),
            quantity: next(),
            unit: next(),
            outer_diameter: next(),
            inner_diameter: next(),
            length: next(),
        })
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; COLUMN_COUNT] {
        [
            self.item.as_str(),
            self.description.as_str(),
            self.material.as_str(),
            self.quantity.as_str(),
            self.unit.as_str(),
            self.outer_diameter.as_str(),
            self.inner_diameter.as_str(),
            self.length.as_str(),
        ]
    }
}

/// Which extraction stage produced a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    Structured,
    LineParser,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStage::Structured => write!(f, "structured tables"),
            ExtractionStage::LineParser => write!(f, "text lines"),
        }
    }
}

/// The extracted material list, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// `None` when neither stage found any rows.
    pub source: Option<ExtractionStage>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn empty() -> Self {
        Dataset::default()
    }

    /// Assemble positional rows into the fixed schema.
    pub fn assemble(
        source: ExtractionStage,
        raw_rows: Vec<Vec<String>>,
    ) -> Result<Dataset, ListamatError> {
        let rows = raw_rows
            .into_iter()
            .map(Row::from_fields)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Dataset {
            source: if rows.is_empty() { None } else { Some(source) },
            rows,
        })
    }

    pub fn columns(&self) -> &'static [&'static str; COLUMN_COUNT] {
        &COLUMNS
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

//! Structured table detection from word bounding boxes.
//!
//! `pdftotext -bbox` reports every word with its box on the page. Words are
//! grouped into lines by vertical position, lines are cut into cells at wide
//! horizontal gaps, and runs of lines with enough cells become tables whose
//! columns are the merged horizontal extents of their cells.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ListamatError;
use crate::extraction::poppler::{self, PDFTOTEXT};
use crate::extraction::{CandidateTable, PageTables, TableDetector};
use crate::options::DetectorConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Word {
    fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Cell {
    text: String,
    x_min: f32,
    x_max: f32,
}

/// Table detector backed by `pdfinfo` and `pdftotext -bbox`.
///
/// Each page is read by its own pdftotext run, so a page that fails to
/// render or parse does not affect the others.
pub struct PdftotextTableDetector {
    config: DetectorConfig,
}

impl PdftotextTableDetector {
    pub fn new(config: DetectorConfig) -> Self {
        PdftotextTableDetector { config }
    }

    fn page_tables(
        &self,
        pdf_path: &std::path::Path,
        page_number: usize,
    ) -> Result<Vec<CandidateTable>, ListamatError> {
        let page = page_number.to_string();
        let stdout = poppler::run_tool(
            PDFTOTEXT,
            &["-enc", "UTF-8", "-bbox", "-f", page.as_str(), "-l", page.as_str()],
            pdf_path,
        )
        .map_err(|e| ListamatError::PageParse {
            page: page_number,
            reason: e.to_string(),
        })?;

        let xml = String::from_utf8_lossy(&stdout);
        let words = parse_bbox_words(&xml)
            .map_err(|reason| ListamatError::PageParse {
                page: page_number,
                reason,
            })?
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(detect_tables(&words, &self.config))
    }
}

impl Default for PdftotextTableDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl TableDetector for PdftotextTableDetector {
    fn detect_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, ListamatError> {
        let tmpfile = poppler::write_temp_pdf(pdf_bytes)?;
        let pages = poppler::page_count(tmpfile.path())?;

        Ok((1..=pages)
            .map(|page_number| PageTables {
                page_number,
                tables: self.page_tables(tmpfile.path(), page_number),
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "pdftotext-bbox"
    }
}

/// Parse `pdftotext -bbox` XHTML into the words of each `<page>`.
pub fn parse_bbox_words(xml: &str) -> Result<Vec<Vec<Word>>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Word>> = Vec::new();
    let mut current: Option<Word> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"word" => current = Some(word_from_tag(&e)?),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(word) = current.as_mut() {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    word.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"word" => {
                if let Some(word) = current.take() {
                    let text = word.text.trim();
                    if !text.is_empty() {
                        let word = Word {
                            text: text.to_string(),
                            ..word
                        };
                        match pages.last_mut() {
                            Some(page) => page.push(word),
                            None => return Err("word outside of a page".into()),
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed bbox XML at byte {}: {e}",
                    reader.error_position()
                ))
            }
            _ => {}
        }
    }

    Ok(pages)
}

fn word_from_tag(tag: &BytesStart) -> Result<Word, String> {
    let coord = |name: &str| -> Result<f32, String> {
        let attr = tag
            .try_get_attribute(name)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("word without {name}"))?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        value
            .trim()
            .parse()
            .map_err(|_| format!("invalid {name} '{value}'"))
    };

    Ok(Word {
        text: String::new(),
        x_min: coord("xMin")?,
        y_min: coord("yMin")?,
        x_max: coord("xMax")?,
        y_max: coord("yMax")?,
    })
}

/// Find tables among the words of one page.
pub fn detect_tables(words: &[Word], config: &DetectorConfig) -> Vec<CandidateTable> {
    let lines: Vec<Vec<Cell>> = group_lines(words, config.line_tolerance)
        .iter()
        .map(|line| split_cells(line, config.cell_gap))
        .collect();

    let mut tables = Vec::new();
    let mut run: Vec<&Vec<Cell>> = Vec::new();

    for line in &lines {
        if line.len() >= config.min_columns {
            run.push(line);
            continue;
        }
        if !run.is_empty() {
            tables.push(build_table(&run));
            run.clear();
        }
    }
    if !run.is_empty() {
        tables.push(build_table(&run));
    }

    tables
}

/// Group words into lines, top to bottom, each line ordered left to right.
fn group_lines(words: &[Word], tolerance: f32) -> Vec<Vec<Word>> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));

    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line_center = f32::NAN;

    for word in sorted {
        let center = word.center_y();
        match lines.last_mut() {
            Some(line) if (center - line_center).abs() <= tolerance => {
                line.push(word.clone());
                line_center = line.iter().map(Word::center_y).sum::<f32>() / line.len() as f32;
            }
            _ => {
                lines.push(vec![word.clone()]);
                line_center = center;
            }
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    }

    lines
}

fn split_cells(line: &[Word], gap: f32) -> Vec<Cell> {
    let mut cells: Vec<Cell> = Vec::new();

    for word in line {
        match cells.last_mut() {
            Some(cell) if word.x_min - cell.x_max <= gap => {
                cell.text.push(' ');
                cell.text.push_str(&word.text);
                cell.x_max = cell.x_max.max(word.x_max);
            }
            _ => cells.push(Cell {
                text: word.text.clone(),
                x_min: word.x_min,
                x_max: word.x_max,
            }),
        }
    }

    cells
}

fn build_table(lines: &[&Vec<Cell>]) -> CandidateTable {
    let columns = column_extents(lines);

    let rows = lines
        .iter()
        .map(|line| {
            let mut row: Vec<Option<String>> = vec![None; columns.len()];
            for cell in line.iter() {
                let Some(col) = columns
                    .iter()
                    .position(|&(start, end)| cell.x_min >= start && cell.x_min <= end)
                else {
                    continue;
                };
                match &mut row[col] {
                    Some(text) => {
                        text.push(' ');
                        text.push_str(&cell.text);
                    }
                    slot => *slot = Some(cell.text.clone()),
                }
            }
            row
        })
        .collect();

    CandidateTable { rows }
}

/// Merge overlapping cell extents into column ranges, left to right.
fn column_extents(lines: &[&Vec<Cell>]) -> Vec<(f32, f32)> {
    let mut extents: Vec<(f32, f32)> = lines
        .iter()
        .flat_map(|line| line.iter().map(|c| (c.x_min, c.x_max)))
        .collect();
    extents.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut columns: Vec<(f32, f32)> = Vec::new();
    for (start, end) in extents {
        match columns.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => columns.push((start, end)),
        }
    }
    columns
}

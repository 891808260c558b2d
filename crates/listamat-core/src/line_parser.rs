//! Rebuild material list rows from plain page text.
//!
//! Used when no structured table is found. Lines between the list title and
//! the notes block are read one at a time: a line that starts with an item
//! number opens a new row, a lone word continues the previous description,
//! everything else is skipped.

use crate::error::ListamatError;
use crate::extraction::{PageContent, PdfExtractor};
use crate::model::COLUMN_COUNT;
use crate::options::LineParserConfig;
use crate::structured::is_item_number;

/// Extract page text with `extractor` and parse it into positional rows.
pub fn extract_rows(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &LineParserConfig,
) -> Result<Vec<Vec<String>>, ListamatError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        pages = pages.len(),
        backend = extractor.backend_name(),
        "page text extracted"
    );
    Ok(parse_pages(&pages, config))
}

/// Parse the lines of every page, in order, with one parser state.
pub fn parse_pages(pages: &[PageContent], config: &LineParserConfig) -> Vec<Vec<String>> {
    let mut parser = LineParser::new(config);
    for page in pages {
        for line in &page.lines {
            parser.feed_line(line);
        }
    }
    parser.finish()
}

#[derive(Debug)]
enum State {
    OutsideTable,
    InsideTable { current: Option<RowBuilder> },
}

/// Line-by-line state machine over the text of a document.
pub struct LineParser<'a> {
    config: &'a LineParserConfig,
    state: State,
    rows: Vec<Vec<String>>,
}

impl<'a> LineParser<'a> {
    pub fn new(config: &'a LineParserConfig) -> Self {
        LineParser {
            config,
            state: State::OutsideTable,
            rows: Vec::new(),
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();

        if self.is_start_marker(line) {
            // A repeated title inside the table keeps the open row.
            if matches!(self.state, State::OutsideTable) {
                tracing::debug!("material list start marker found");
                self.state = State::InsideTable { current: None };
            }
            return;
        }

        let State::InsideTable { current } = &mut self.state else {
            return;
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() >= 3 && is_item_number(tokens[0]) {
            if let Some(done) = current.take() {
                self.rows.push(done.finish());
            }
            *current = Some(RowBuilder::start(&tokens));
        } else if line.contains(self.config.end_marker.as_str()) {
            if let Some(done) = current.take() {
                self.rows.push(done.finish());
            }
            tracing::debug!(rows = self.rows.len(), "material list end marker found");
            self.state = State::OutsideTable;
        } else if let (&[token], Some(row)) = (tokens.as_slice(), current.as_mut()) {
            row.continue_description(token);
        }
    }

    /// Rows parsed so far, flushing a row left open at the end of the text.
    pub fn finish(mut self) -> Vec<Vec<String>> {
        if let State::InsideTable { current: Some(done) } = self.state {
            tracing::debug!(item = %done.item, "flushing row open at end of document");
            self.rows.push(done.finish());
        }
        self.rows
    }

    fn is_start_marker(&self, line: &str) -> bool {
        self.config
            .start_markers
            .iter()
            .all(|marker| line.contains(marker.as_str()))
    }
}

/// A row under construction: the item number, description words and
/// positional values in the order they were read.
#[derive(Debug)]
struct RowBuilder {
    item: String,
    description: String,
    values: Vec<String>,
}

impl RowBuilder {
    fn start(tokens: &[&str]) -> Self {
        let mut row = RowBuilder {
            item: tokens[0].to_string(),
            description: String::new(),
            values: Vec::new(),
        };

        for &token in &tokens[1..] {
            if is_description_token(token) {
                row.push_description(token);
            } else if is_value_token(token) {
                if row.field_count() < COLUMN_COUNT {
                    row.values.push(token.to_string());
                } else {
                    row.push_description(token);
                }
            }
        }

        row
    }

    /// Item and description always take a field each.
    fn field_count(&self) -> usize {
        2 + self.values.len()
    }

    fn push_description(&mut self, token: &str) {
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(token);
    }

    fn continue_description(&mut self, token: &str) {
        self.push_description(token);
    }

    fn finish(self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.field_count());
        fields.push(self.item);
        fields.push(self.description);
        fields.extend(self.values);
        fields
    }
}

/// Words and hyphenated names ("FO-FO", "PEAD-100") belong to the description.
fn is_description_token(token: &str) -> bool {
    token.chars().all(char::is_alphabetic) || token.contains('-')
}

/// Plain numbers and anything with an "x" (dimensions such as "50x2").
fn is_value_token(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit()) || token.contains('x')
}

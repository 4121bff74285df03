//! DOCX table reader
//!
//! Reads `word/document.xml` out of the ZIP container and collects the first
//! top-level `w:tbl` into a cell grid. Horizontal merges (`w:gridSpan`) are
//! replicated across the spanned columns, vertical merge continuations
//! (`w:vMerge`) repeat the cell above, and `w:gridBefore` inserts blank
//! leading cells. Text inside nested tables is folded into the enclosing cell.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::{remove_zero_width, SourceError, SourceResult, TableSource, MAX_SPAN};
use crate::table::{cell_from_text, Grid, Table};

/// Main document part inside a DOCX container
const DOCUMENT_PART: &str = "word/document.xml";

/// Reader for Word (`.docx`) timetables
#[derive(Debug, Clone, Default)]
pub struct DocxReader;

impl DocxReader {
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(&self, path: &Path) -> SourceResult<String> {
        let display = || path.display().to_string();

        let file = File::open(path).map_err(|source| SourceError::Io {
            path: display(),
            source,
        })?;
        let mut archive = ZipArchive::new(file).map_err(|source| SourceError::Zip {
            path: display(),
            source,
        })?;
        let mut entry = archive
            .by_name(DOCUMENT_PART)
            .map_err(|source| SourceError::Zip {
                path: display(),
                source,
            })?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|source| SourceError::Io {
                path: display(),
                source,
            })?;
        Ok(xml)
    }
}

impl TableSource for DocxReader {
    fn read_table(&self, path: &Path) -> SourceResult<Table> {
        let xml = self.read_document_xml(path)?;
        let grid = parse_first_table(&xml).map_err(|source| SourceError::Xml {
            path: path.display().to_string(),
            source,
        })?;

        grid.and_then(Table::from_grid)
            .ok_or_else(|| SourceError::NoTable {
                path: path.display().to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VMerge {
    None,
    Restart,
    Continue,
}

/// Accumulates the cells of the first top-level table
#[derive(Debug)]
struct TableCollector {
    depth: usize,
    rows: Grid,
    row: Vec<Option<String>>,
    cell: String,
    span: usize,
    vmerge: VMerge,
    in_text: bool,
}

impl TableCollector {
    fn new() -> Self {
        Self {
            depth: 0,
            rows: Vec::new(),
            row: Vec::new(),
            cell: String::new(),
            span: 1,
            vmerge: VMerge::None,
            in_text: false,
        }
    }

    fn on_open(&mut self, e: &BytesStart, self_closing: bool) {
        match e.local_name().as_ref() {
            b"tbl" if !self_closing => self.depth += 1,
            b"tr" if self.depth == 1 && !self_closing => self.row.clear(),
            b"tc" if self.depth == 1 && !self_closing => {
                self.cell.clear();
                self.span = 1;
                self.vmerge = VMerge::None;
            }
            b"gridSpan" if self.depth == 1 => {
                self.span = attr_val(e)
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(1)
                    .min(MAX_SPAN);
            }
            b"vMerge" if self.depth == 1 => {
                self.vmerge = match attr_val(e).as_deref() {
                    Some("restart") => VMerge::Restart,
                    _ => VMerge::Continue,
                };
            }
            b"gridBefore" if self.depth == 1 => {
                let skip = attr_val(e)
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0)
                    .min(MAX_SPAN);
                self.row.extend(std::iter::repeat(None).take(skip));
            }
            b"t" if self.depth >= 1 && !self_closing => self.in_text = true,
            b"br" | b"tab" | b"cr" if self.depth >= 1 => self.cell.push(' '),
            _ => {}
        }
    }

    /// Returns true once the first top-level table is closed
    fn on_close(&mut self, local: &[u8]) -> bool {
        match local {
            b"tbl" if self.depth > 0 => {
                self.depth -= 1;
                return self.depth == 0;
            }
            b"tr" if self.depth == 1 => {
                self.rows.push(std::mem::take(&mut self.row));
            }
            b"tc" if self.depth == 1 => self.finish_cell(),
            b"p" if self.depth >= 1 => self.cell.push(' '),
            b"t" => self.in_text = false,
            _ => {}
        }
        false
    }

    fn on_text(&mut self, text: &str) {
        if self.depth >= 1 && self.in_text {
            self.cell.push_str(text);
        }
    }

    fn finish_cell(&mut self) {
        let column = self.row.len();
        let value = match self.vmerge {
            VMerge::Continue => self
                .rows
                .last()
                .and_then(|above| above.get(column).cloned())
                .flatten(),
            VMerge::None | VMerge::Restart => cell_from_text(&remove_zero_width(&self.cell)),
        };

        for _ in 0..self.span {
            self.row.push(value.clone());
        }
    }
}

fn attr_val(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

/// Collect the first top-level table of a WordprocessingML document
///
/// Returns `Ok(None)` when the document has no table.
pub fn parse_first_table(xml: &str) -> Result<Option<Grid>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut collector = TableCollector::new();
    let mut seen_table = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"tbl" {
                    seen_table = true;
                }
                collector.on_open(&e, false);
            }
            Event::Empty(e) => collector.on_open(&e, true),
            Event::Text(e) => {
                let text = e.unescape()?;
                collector.on_text(&text);
            }
            Event::End(e) => {
                if collector.on_close(e.local_name().as_ref()) {
                    return Ok(Some(collector.rows));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Truncated document: keep whatever rows were completed
    Ok(seen_table.then_some(collector.rows))
}

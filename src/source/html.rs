//! HTML table reader
//!
//! Handles timetables exported to HTML. The first `<table>` of the page is
//! read; rows belonging to nested tables are ignored as rows and their text
//! stays inside the enclosing cell. `colspan`/`rowspan` are expanded by
//! replicating the spanning cell, matching the DOCX reader's merge handling.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

use super::{remove_zero_width, SourceError, SourceResult, TableSource, MAX_SPAN};
use crate::table::{cell_from_text, Grid, Table};

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid table selector"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).unwrap()
});

/// Reader for HTML timetable exports
#[derive(Debug, Clone, Default)]
pub struct HtmlReader;

impl HtmlReader {
    pub fn new() -> Self {
        Self
    }
}

impl TableSource for HtmlReader {
    fn read_table(&self, path: &Path) -> SourceResult<Table> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let html = decode_html(&bytes);

        parse_first_table(&html)
            .and_then(Table::from_grid)
            .ok_or_else(|| SourceError::NoTable {
                path: path.display().to_string(),
            })
    }
}

/// Decode HTML bytes using the BOM, then the declared `<meta charset>`,
/// falling back to UTF-8
pub fn decode_html(bytes: &[u8]) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            let head_len = bytes.len().min(2048);
            let head = String::from_utf8_lossy(&bytes[..head_len]);
            CHARSET_REGEX
                .captures(&head)
                .and_then(|caps| Encoding::for_label(caps[1].as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[derive(Debug, Clone)]
struct RawCell {
    text: Option<String>,
    colspan: usize,
    rowspan: usize,
}

/// Collect the first table of an HTML document into a cell grid
pub fn parse_first_table(html: &str) -> Option<Grid> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE_SELECTOR).next()?;

    let rows: Vec<Vec<RawCell>> = table
        .select(&ROW_SELECTOR)
        .filter(|row| owning_table(*row) == Some(table))
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(raw_cell)
                .collect()
        })
        .collect();

    Some(expand_spans(rows))
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "table")
}

fn raw_cell(cell: ElementRef) -> RawCell {
    let span = |name: &str| {
        cell.value()
            .attr(name)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1)
            .min(MAX_SPAN)
    };

    let mut text = String::new();
    collect_text(cell, &mut text);

    RawCell {
        text: cell_from_text(&remove_zero_width(&text)),
        colspan: span("colspan"),
        rowspan: span("rowspan"),
    }
}

/// Concatenate descendant text, separating block-level elements with spaces
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let block = matches!(
                child_element.value().name(),
                "p" | "div" | "br" | "li" | "table" | "tr" | "td" | "th"
            );
            if block {
                out.push(' ');
            }
            collect_text(child_element, out);
            if block {
                out.push(' ');
            }
        }
    }
}

fn expand_spans(rows: Vec<Vec<RawCell>>) -> Grid {
    // Per grid column: rows still covered by a rowspan, and the text to repeat
    let mut carry: Vec<Option<(usize, Option<String>)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for cells in rows {
        let mut out: Vec<Option<String>> = Vec::new();
        let mut cells = cells.into_iter();

        loop {
            let col = out.len();
            if let Some(Some((remaining, text))) = carry.get(col).cloned() {
                out.push(text.clone());
                carry[col] = (remaining > 1).then_some((remaining - 1, text));
                continue;
            }

            match cells.next() {
                Some(cell) => {
                    for _ in 0..cell.colspan {
                        let col = out.len();
                        out.push(cell.text.clone());
                        if cell.rowspan > 1 {
                            if carry.len() <= col {
                                carry.resize(col + 1, None);
                            }
                            carry[col] = Some((cell.rowspan - 1, cell.text.clone()));
                        }
                    }
                }
                None => {
                    if carry.iter().skip(col).any(Option::is_some) {
                        out.push(None);
                        continue;
                    }
                    break;
                }
            }
        }

        grid.push(out);
    }

    grid
}

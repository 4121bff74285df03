//! Test fixtures for integration tests
//!
//! HTML timetables live under `tests/fixtures/html`; DOCX timetables are
//! assembled on the fly so the WordprocessingML stays readable here.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Copy a fixture into `dir`, keeping its file name
pub fn copy_fixture(relative: &str, dir: &Path) -> PathBuf {
    let source = fixture_path(relative);
    let target = dir.join(source.file_name().unwrap());
    std::fs::copy(&source, &target).unwrap();
    target
}

/// One table cell of a DOCX fixture
pub enum Cell<'a> {
    Text(&'a str),
    Empty,
    /// Continues the vertical merge of the cell above
    Merged,
    /// Text spanning several grid columns
    Span(&'a str, usize),
}

/// Timetable with a split group header, a merged day cell and a reversed
/// day label
pub fn split_group_rows() -> Vec<Vec<Cell<'static>>> {
    use Cell::*;
    vec![
        vec![Text("День"), Text("Пара"), Span("ТП-5м", 2)],
        vec![
            Text("Середа"),
            Text("1"),
            Text("Л.203 Фізика доц. Іванов І. П."),
            Text("Фізичне виховання"),
        ],
        vec![Merged, Text("2"), Text("ІПЗПКТ (лаб.) ст. в. Л.2"), Empty],
        vec![
            Text("яцинтя’П"),
            Text("4"),
            Text("Фізика доц. Коваль"),
            Text("Фізика доц. Коваль"),
        ],
    ]
}

fn cell_xml(cell: &Cell) -> String {
    let paragraph = |text: &str| {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
    };
    match cell {
        Cell::Text(text) => format!("<w:tc>{}</w:tc>", paragraph(text)),
        Cell::Empty => "<w:tc><w:p/></w:tc>".to_string(),
        Cell::Merged => "<w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc>".to_string(),
        Cell::Span(text, span) => format!(
            "<w:tc><w:tcPr><w:gridSpan w:val=\"{span}\"/></w:tcPr>{}</w:tc>",
            paragraph(text)
        ),
    }
}

/// WordprocessingML body with a heading paragraph and one table
pub fn document_xml(rows: &[Vec<Cell>]) -> String {
    let table: String = rows
        .iter()
        .map(|row| format!("<w:tr>{}</w:tr>", row.iter().map(cell_xml).collect::<String>()))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Розклад занять</w:t></w:r></w:p><w:tbl>{table}</w:tbl><w:sectPr/></w:body></w:document>"#
    )
}

/// Write a minimal `.docx` container holding `rows` as its only table
pub fn write_docx(path: &Path, rows: &[Vec<Cell>]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
    )
    .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(rows).as_bytes()).unwrap();

    zip.finish().unwrap();
}

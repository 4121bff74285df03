//! Error scenario integration tests
//!
//! Tests various failure modes and error handling:
//! 1. Tables without group columns
//! 2. Unreadable or unsupported documents
//! 3. Malformed schedule files
//! 4. Invalid batching settings

use rozklad::error::{Error, ErrorCategory};
use rozklad::pipeline::{export_teacher_schedules, ConversionPipeline, PipelineConfig};
use rozklad::source::{load_table, SourceError, MAX_SPAN};
use rozklad::storage::group_into_folders;
use std::path::Path;
use tempfile::TempDir;

use super::fixtures::{copy_fixture, fixture_path, write_docx, Cell};

fn html_pipeline(documents_dir: &Path, output_dir: &Path) -> ConversionPipeline {
    ConversionPipeline::new(PipelineConfig {
        documents_dir: documents_dir.to_path_buf(),
        extensions: vec!["html".to_string(), "docx".to_string()],
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    })
}

// ============================================================================
// Table Shape Errors
// ============================================================================

#[test]
fn test_no_group_columns_fails_without_output() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/no_groups.html", docs.path());

    let result = html_pipeline(docs.path(), out.path()).run_directory();

    match result {
        Err(Error::NoGroupColumns { document }) => assert_eq!(document, "no_groups.html"),
        other => panic!("expected NoGroupColumns, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_single_column_table_is_malformed() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_docx(
        &docs.path().join("one.docx"),
        &[vec![Cell::Text("КН-41")], vec![Cell::Text("Фізика")]],
    );

    let err = html_pipeline(docs.path(), out.path())
        .run_directory()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedTable { .. }));
    assert_eq!(err.category(), ErrorCategory::Parsing);
}

#[test]
fn test_rows_without_day_or_period_are_skipped() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_docx(
        &docs.path().join("gaps.docx"),
        &[
            vec![Cell::Text("День"), Cell::Text("Пара"), Cell::Text("КН-41")],
            vec![Cell::Empty, Cell::Text("1"), Cell::Text("Без дня")],
            vec![Cell::Text("Четвер"), Cell::Text("-"), Cell::Text("Без пари")],
            vec![Cell::Text("Субота"), Cell::Text("2"), Cell::Text("Вихідний")],
            vec![Cell::Text("Четвер"), Cell::Text("3"), Cell::Text("Хімія")],
        ],
    );

    let stats = html_pipeline(docs.path(), out.path()).run_directory().unwrap();
    assert_eq!(stats.skipped_rows, 3);
    assert_eq!(stats.lessons, 1);

    let schedule = rozklad::storage::load_schedule(&out.path().join("КН-41.json")).unwrap();
    assert_eq!(schedule.thursday.classes[0].name, "Хімія");
}

// ============================================================================
// Source Errors
// ============================================================================

#[test]
fn test_corrupt_docx() {
    let docs = TempDir::new().unwrap();
    let path = docs.path().join("broken.docx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, SourceError::Zip { .. }));

    let unified: Error = err.into();
    assert_eq!(unified.category(), ErrorCategory::Input);
}

#[test]
fn test_oversized_docx_span_is_bounded() {
    let docs = TempDir::new().unwrap();
    let path = docs.path().join("wide.docx");
    write_docx(
        &path,
        &[
            vec![Cell::Text("День"), Cell::Text("Пара"), Cell::Span("КН-41", 5_000_000)],
            vec![Cell::Text("Понеділок"), Cell::Text("1"), Cell::Text("Фізика")],
        ],
    );

    let table = load_table(&path).unwrap();
    assert!(table.columns().len() <= MAX_SPAN + 2);
}

#[test]
fn test_unsupported_extension() {
    let err = load_table(Path::new("rozklad.pdf")).unwrap_err();
    assert!(matches!(err, SourceError::UnsupportedFormat { .. }));
}

#[test]
fn test_html_without_table() {
    let docs = TempDir::new().unwrap();
    let path = docs.path().join("empty.html");
    std::fs::write(&path, "<html><body><p>Розклад буде пізніше</p></body></html>").unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, SourceError::NoTable { .. }));
}

#[test]
fn test_missing_documents_dir() {
    let out = TempDir::new().unwrap();
    let result = html_pipeline(Path::new("/nonexistent/rozklad"), out.path()).run_directory();
    assert!(result.is_err());
}

#[test]
fn test_fixture_is_readable() {
    let table = load_table(&fixture_path("html/rozklad.html")).unwrap();
    assert_eq!(table.columns()[2], "КН-41");
    assert_eq!(table.height(), 5);
}

// ============================================================================
// Output Errors
// ============================================================================

#[test]
fn test_malformed_group_file() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();
    std::fs::write(groups.path().join("КН-41.json"), "{ not json").unwrap();

    let result = export_teacher_schedules(groups.path(), teachers.path());
    assert!(result.is_err());
}

#[test]
fn test_zero_schedules_per_folder() {
    let dir = TempDir::new().unwrap();
    let err = group_into_folders(dir.path(), 0).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Config);
}

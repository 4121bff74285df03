//! Pipeline integration tests
//!
//! Documents on disk → group schedule files, for both source formats.

use rozklad::models::Lesson;
use rozklad::pipeline::{ConversionPipeline, PipelineConfig};
use rozklad::storage::load_schedule;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

use super::fixtures::{copy_fixture, split_group_rows, write_docx};

fn pipeline_for(documents_dir: &Path, output_dir: &Path) -> ConversionPipeline {
    ConversionPipeline::new(PipelineConfig {
        documents_dir: documents_dir.to_path_buf(),
        extensions: vec!["docx".to_string(), "html".to_string()],
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    })
}

fn names(lessons: &[Lesson]) -> Vec<(u32, &str)> {
    lessons.iter().map(|l| (l.index, l.name.as_str())).collect()
}

// ============================================================================
// HTML Source
// ============================================================================

#[test]
fn test_html_document_to_group_files() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());

    let stats = pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.groups, 2);
    assert_eq!(stats.skipped_rows, 0);
    assert!(out.path().join("КН-41.json").exists());
    assert!(out.path().join("КТ-12м.json").exists());
}

#[test]
fn test_html_lessons_extracted() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    let schedule = load_schedule(&out.path().join("КН-41.json")).unwrap();
    let monday = &schedule.monday.classes;
    assert_eq!(
        names(monday),
        vec![
            (1, "Фізика"),
            (2, "Вища математика"),
            (3, "Програмування"),
            (3, "Бази даних"),
        ]
    );

    let physics = &monday[0];
    assert_eq!(physics.room.as_deref(), Some("Л.203"));
    assert_eq!(physics.qualification.as_deref(), Some("доц."));
    assert_eq!(physics.teacher.as_deref(), Some("Іванов І. П."));
    assert_eq!(physics.is_biweekly, None);

    let maths = &monday[1];
    assert_eq!(maths.room.as_deref(), Some("Г.12а"));
    assert_eq!(maths.teacher.as_deref(), Some("Коваль"));
}

#[test]
fn test_html_biweekly_pair() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    let schedule = load_schedule(&out.path().join("КН-41.json")).unwrap();
    let third: Vec<&Lesson> = schedule
        .monday
        .classes
        .iter()
        .filter(|l| l.index == 3)
        .collect();

    assert_eq!(third[0].week, Some(1));
    assert_eq!(third[0].is_biweekly, Some(true));
    assert_eq!(third[1].week, Some(2));
    assert_eq!(third[1].label, Some(2.0));
}

#[test]
fn test_html_placeholder_and_misspelled_day() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    let schedule = load_schedule(&out.path().join("КТ-12м.json")).unwrap();

    // The `---` row is dropped; its partner keeps the first-week label
    let monday = &schedule.monday.classes;
    assert_eq!(names(monday), vec![(1, "Фізика"), (3, "Фізичне виховання")]);
    assert_eq!(monday[1].week, Some(1));

    // "Вiвторок" (Latin i) is corrected to Tuesday
    assert_eq!(names(&schedule.tuesday.classes), vec![(1, "Програмування")]);
    assert_eq!(
        schedule.tuesday.classes[0].teacher.as_deref(),
        Some("Шепіта П. І.")
    );
    assert!(schedule.wednesday.classes.is_empty());
}

#[test]
fn test_output_json_shape() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    let text = std::fs::read_to_string(out.path().join("КН-41.json")).unwrap();
    assert!(text.contains("\"name\": \"Фізика\""), "non-ASCII must not be escaped");
    assert!(text.starts_with("{\n    \"monday\""));

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["friday"]["classes"], Value::Array(Vec::new()));
    let first = &json["monday"]["classes"][0];
    for key in ["index", "name", "room", "qualification", "teacher", "label", "isBiweekly", "week"] {
        assert!(first.get(key).is_some(), "missing key {key}");
    }
    assert!(first.get("group").is_none());
}

// ============================================================================
// DOCX Source
// ============================================================================

#[test]
fn test_docx_split_group_columns() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_docx(&docs.path().join("ТП.docx"), &split_group_rows());

    let stats = pipeline_for(docs.path(), out.path()).run_directory().unwrap();
    assert_eq!(stats.groups, 2);

    let first = load_schedule(&out.path().join("ТП-5м.json")).unwrap();
    let second = load_schedule(&out.path().join("ТП-5м_2.json")).unwrap();

    assert_eq!(
        names(&first.wednesday.classes),
        vec![(1, "Фізика"), (2, "ІПЗПКТ (лаб.)")]
    );
    assert_eq!(names(&second.wednesday.classes), vec![(1, "Фізичне виховання")]);

    let lab = &first.wednesday.classes[1];
    assert_eq!(lab.room.as_deref(), Some("Л.2"));
    assert_eq!(lab.qualification.as_deref(), Some("ст. в."));
    assert!(lab.teacher.is_none());
}

#[test]
fn test_docx_reversed_day_label() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_docx(&docs.path().join("ТП.docx"), &split_group_rows());
    pipeline_for(docs.path(), out.path()).run_directory().unwrap();

    let second = load_schedule(&out.path().join("ТП-5м_2.json")).unwrap();
    assert_eq!(names(&second.friday.classes), vec![(4, "Фізика")]);
    assert_eq!(second.friday.classes[0].teacher.as_deref(), Some("Коваль"));
}

#[test]
fn test_mixed_formats_and_folder_grouping() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    write_docx(&docs.path().join("ТП.docx"), &split_group_rows());

    let pipeline = ConversionPipeline::new(PipelineConfig {
        documents_dir: docs.path().to_path_buf(),
        extensions: vec!["docx".to_string(), "html".to_string()],
        output_dir: out.path().to_path_buf(),
        group_into_folders: true,
        schedules_per_folder: 3,
        ..Default::default()
    });
    let stats = pipeline.run_directory().unwrap();

    assert_eq!(stats.documents, 2);
    assert_eq!(stats.groups, 4);
    assert_eq!(stats.folders, 2);
    assert!(out.path().join("group0").is_dir());
    assert!(out.path().join("group1").is_dir());

    let loose: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .collect();
    assert!(loose.is_empty(), "every schedule should be moved into a folder");
}

#[test]
fn test_extension_filter() {
    let docs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());
    write_docx(&docs.path().join("ТП.docx"), &split_group_rows());

    let pipeline = ConversionPipeline::new(PipelineConfig {
        documents_dir: docs.path().to_path_buf(),
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    });
    let stats = pipeline.run_directory().unwrap();

    // Default configuration only reads .docx
    assert_eq!(stats.documents, 1);
    assert!(!out.path().join("КН-41.json").exists());
}

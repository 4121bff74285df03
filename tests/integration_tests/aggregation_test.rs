//! Teacher aggregation through files
//!
//! Group schedule files → teacher schedule files.

use rozklad::models::Lesson;
use rozklad::pipeline::{export_teacher_schedules, ConversionPipeline, PipelineConfig};
use rozklad::storage::{load_schedule, ScheduleStore};
use serde_json::Value;
use tempfile::TempDir;

use super::fixtures::copy_fixture;
use crate::common::{biweekly_lesson, lesson, monday_group};

#[test]
fn test_shared_lesson_merged_across_groups() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group("КТ-12м", vec![lesson(5, "ІПЗПКТ", "Шепіта П. І.")]))
        .unwrap();
    store
        .save_group(&monday_group("КН-41", vec![lesson(5, "ІПЗПКТ", "Шепіта П. І.")]))
        .unwrap();

    let count = export_teacher_schedules(groups.path(), teachers.path()).unwrap();
    assert_eq!(count, 1);

    let schedule = load_schedule(&teachers.path().join("Шепіта П. І..json")).unwrap();
    assert_eq!(schedule.monday.classes.len(), 1);
    assert_eq!(
        schedule.monday.classes[0].group.as_deref(),
        Some("КН-41|КТ-12м")
    );
}

#[test]
fn test_multiple_teachers_each_get_the_lesson() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group(
            "КН-41",
            vec![lesson(2, "Фізика", "Снігур А. В.|Петров П. С.")],
        ))
        .unwrap();

    let count = export_teacher_schedules(groups.path(), teachers.path()).unwrap();
    assert_eq!(count, 2);

    for teacher in ["Снігур А. В.", "Петров П. С."] {
        let schedule = load_schedule(&teachers.path().join(format!("{teacher}.json"))).unwrap();
        let lesson = &schedule.monday.classes[0];
        assert_eq!(lesson.name, "Фізика");
        assert_eq!(lesson.group.as_deref(), Some("КН-41"));
        // The teacher field is copied unchanged
        assert_eq!(lesson.teacher.as_deref(), Some("Снігур А. В.|Петров П. С."));
    }
}

#[test]
fn test_teacher_file_stem_is_teacher_name() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group(
            "КН-41",
            vec![
                lesson(1, "Фізика", "Іванов І. П."),
                lesson(2, "Хімія", "Мороз"),
            ],
        ))
        .unwrap();

    export_teacher_schedules(groups.path(), teachers.path()).unwrap();

    let mut stems: Vec<String> = std::fs::read_dir(teachers.path())
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            path.file_stem().unwrap().to_str().unwrap().to_string()
        })
        .collect();
    stems.sort();
    assert_eq!(stems, vec!["Іванов І. П.", "Мороз"]);
}

#[test]
fn test_different_weeks_stay_separate() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group(
            "КН-41",
            vec![biweekly_lesson(3, "Фізика", "Коваль", 1)],
        ))
        .unwrap();
    store
        .save_group(&monday_group(
            "КН-42",
            vec![
                biweekly_lesson(3, "Фізика", "Коваль", 2),
                lesson(1, "Фізика", "Коваль"),
            ],
        ))
        .unwrap();

    export_teacher_schedules(groups.path(), teachers.path()).unwrap();

    let schedule = load_schedule(&teachers.path().join("Коваль.json")).unwrap();
    let monday: Vec<(u32, Option<u8>, Option<&str>)> = schedule
        .monday
        .classes
        .iter()
        .map(|l| (l.index, l.week, l.group.as_deref()))
        .collect();
    assert_eq!(
        monday,
        vec![
            (1, None, Some("КН-42")),
            (3, Some(1), Some("КН-41")),
            (3, Some(2), Some("КН-42")),
        ]
    );
}

#[test]
fn test_weekly_lesson_merges_with_first_week() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group("КН-41", vec![lesson(4, "Хімія", "Мороз")]))
        .unwrap();
    store
        .save_group(&monday_group(
            "КН-42",
            vec![biweekly_lesson(4, "Хімія", "Мороз", 1)],
        ))
        .unwrap();

    export_teacher_schedules(groups.path(), teachers.path()).unwrap();

    let schedule = load_schedule(&teachers.path().join("Мороз.json")).unwrap();
    assert_eq!(schedule.monday.classes.len(), 1);
    let merged: &Lesson = &schedule.monday.classes[0];
    assert_eq!(merged.group.as_deref(), Some("КН-41|КН-42"));
    assert_eq!(merged.week, None);
}

#[test]
fn test_lessons_without_teacher_ignored() {
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();

    let store = ScheduleStore::new(groups.path()).unwrap();
    store
        .save_group(&monday_group(
            "КН-41",
            vec![Lesson::new(1, "Фізичне виховання")],
        ))
        .unwrap();

    let count = export_teacher_schedules(groups.path(), teachers.path()).unwrap();
    assert_eq!(count, 0);
    assert_eq!(std::fs::read_dir(teachers.path()).unwrap().count(), 0);
}

#[test]
fn test_documents_to_teacher_files() {
    let docs = TempDir::new().unwrap();
    let groups = TempDir::new().unwrap();
    let teachers = TempDir::new().unwrap();
    copy_fixture("html/rozklad.html", docs.path());

    ConversionPipeline::new(PipelineConfig {
        documents_dir: docs.path().to_path_buf(),
        extensions: vec!["html".to_string()],
        output_dir: groups.path().to_path_buf(),
        group_into_folders: true,
        schedules_per_folder: 1,
        ..Default::default()
    })
    .run_directory()
    .unwrap();

    // Group files now sit in group0/ and group1/; they are found recursively
    let count = export_teacher_schedules(groups.path(), teachers.path()).unwrap();
    assert_eq!(count, 4);

    let ivanov = load_schedule(&teachers.path().join("Іванов І. П..json")).unwrap();
    assert_eq!(ivanov.monday.classes.len(), 1);
    assert_eq!(
        ivanov.monday.classes[0].group.as_deref(),
        Some("КН-41|КТ-12м")
    );

    let shepita = load_schedule(&teachers.path().join("Шепіта П. І..json")).unwrap();
    assert_eq!(shepita.monday.classes[0].group.as_deref(), Some("КН-41"));
    assert_eq!(shepita.monday.classes[0].week, Some(1));
    assert_eq!(shepita.tuesday.classes[0].group.as_deref(), Some("КТ-12м"));

    let text = std::fs::read_to_string(teachers.path().join("Снігур А. В..json")).unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["monday"]["classes"][0]["name"], "Бази даних");
    assert_eq!(json["monday"]["classes"][0]["week"], 2);
    assert_eq!(json["monday"]["classes"][0]["group"], "КН-41");
    assert_eq!(json["thursday"]["classes"], Value::Array(Vec::new()));
}

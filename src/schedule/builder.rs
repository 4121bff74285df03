//! Per-group schedule construction
//!
//! For each weekday the builder walks the day's rows in table order and:
//!
//! 1. labels rows that share a period as alternating weeks (1, 2, 1, ...)
//! 2. drops rows with no class name
//! 3. collapses full duplicates (same period, name and room) to the last
//!    occurrence, clearing its week label
//! 4. drops placeholder rows (`---`)
//! 5. marks labelled rows biweekly and sorts by period

use std::collections::HashMap;

use super::PreparedTable;
use crate::error::{Error, Result};
use crate::models::{DaySchedule, Lesson, WeeklySchedule, Weekday};
use crate::parser::{extract_fields, CellFields};

/// Default prefix of cells that mark an empty slot
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "---";

/// Builds the weekly schedule of one group column
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    placeholder_prefix: String,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_PREFIX)
    }
}

impl ScheduleBuilder {
    pub fn new(placeholder_prefix: impl Into<String>) -> Self {
        Self {
            placeholder_prefix: placeholder_prefix.into(),
        }
    }

    /// Build the schedule for `group`
    ///
    /// A group column with no usable cells yields an all-empty schedule.
    pub fn build(&self, prepared: &PreparedTable, group: &str) -> Result<WeeklySchedule> {
        let column = prepared.table().column_index(group).ok_or_else(|| {
            Error::malformed(prepared.document(), format!("group column {group} not found"))
        })?;

        let mut schedule = WeeklySchedule::empty();
        for day in Weekday::ALL {
            let rows: Vec<(u32, CellFields)> = prepared
                .rows_for(day)
                .map(|(row, index)| {
                    let fields = prepared
                        .cell(row, column)
                        .map(extract_fields)
                        .unwrap_or_default();
                    (index, fields)
                })
                .collect();

            let classes = self.build_day(rows);
            tracing::debug!(group, day = %day, lessons = classes.len(), "Built day");
            *schedule.day_mut(day) = DaySchedule::new(classes);
        }

        Ok(schedule)
    }

    /// Turn one day's rows (period, extracted fields) into lessons
    pub fn build_day(&self, rows: Vec<(u32, CellFields)>) -> Vec<Lesson> {
        let indices: Vec<u32> = rows.iter().map(|(index, _)| *index).collect();
        let labels = biweekly_labels(&indices);

        let lessons: Vec<Lesson> = rows
            .into_iter()
            .zip(labels)
            .filter_map(|((index, fields), label)| {
                let name = fields.name?;
                Some(Lesson {
                    index,
                    name,
                    room: fields.room,
                    qualification: fields.qualification,
                    teacher: fields.teacher,
                    label: label.map(f64::from),
                    ..Default::default()
                })
            })
            .collect();

        let mut lessons: Vec<Lesson> = remove_duplicates(lessons)
            .into_iter()
            .filter(|lesson| !self.is_placeholder(&lesson.name))
            .map(mark_biweekly)
            .collect();

        sort_lessons(&mut lessons);
        lessons
    }

    fn is_placeholder(&self, name: &str) -> bool {
        !self.placeholder_prefix.is_empty() && name.starts_with(&self.placeholder_prefix)
    }
}

/// Alternating week labels for rows that share a period
///
/// Every period occurring more than once gets 1, 2, 1, 2, ... over its
/// occurrences in row order (an odd count ends on 1). Periods occurring
/// once get no label.
///
/// # Examples
///
/// ```
/// use rozklad::schedule::builder::biweekly_labels;
///
/// assert_eq!(
///     biweekly_labels(&[1, 2, 2, 3]),
///     vec![None, Some(1), Some(2), None]
/// );
/// ```
pub fn biweekly_labels(indices: &[u32]) -> Vec<Option<u8>> {
    let mut totals: HashMap<u32, usize> = HashMap::new();
    for index in indices {
        *totals.entry(*index).or_default() += 1;
    }

    let mut seen: HashMap<u32, usize> = HashMap::new();
    indices
        .iter()
        .map(|index| {
            if totals[index] < 2 {
                return None;
            }
            let position = seen.entry(*index).or_default();
            let label = if *position % 2 == 0 { 1 } else { 2 };
            *position += 1;
            Some(label)
        })
        .collect()
}

/// Collapse lessons with the same (period, name, room)
///
/// The last occurrence of each signature survives in its original
/// position; when a signature occurred more than once its label is
/// cleared. Applying this twice gives the same result as once.
pub fn remove_duplicates(lessons: Vec<Lesson>) -> Vec<Lesson> {
    type Signature = (u32, String, Option<String>);
    let signature = |lesson: &Lesson| -> Signature {
        (lesson.index, lesson.name.clone(), lesson.room.clone())
    };

    let mut occurrences: HashMap<Signature, (usize, usize)> = HashMap::new();
    for (position, lesson) in lessons.iter().enumerate() {
        let entry = occurrences.entry(signature(lesson)).or_insert((0, position));
        entry.0 += 1;
        entry.1 = position;
    }

    lessons
        .into_iter()
        .enumerate()
        .filter_map(|(position, mut lesson)| {
            let (count, last) = occurrences[&signature(&lesson)];
            if position != last {
                return None;
            }
            if count > 1 {
                lesson.label = None;
            }
            Some(lesson)
        })
        .collect()
}

/// Stable sort by period
pub fn sort_lessons(lessons: &mut [Lesson]) {
    lessons.sort_by_key(|lesson| lesson.index);
}

fn mark_biweekly(mut lesson: Lesson) -> Lesson {
    if let Some(label) = lesson.label {
        lesson.is_biweekly = Some(true);
        lesson.week = Some(label as u8);
    }
    lesson
}

//! Teacher schedules derived from group schedules
//!
//! Aggregation inverts group → lessons into teacher → lessons:
//!
//! 1. every lesson naming one or more teachers is copied, tagged with its
//!    group, and appended to each named teacher's matching day
//! 2. within a teacher's day, lessons with the same (period, name, week)
//!    are merged; the first one seen is kept and later groups are appended
//!    to its `group` field
//! 3. each day is sorted by period (stable)
//!
//! State lives in a [`TeacherAccumulator`] that exists only for one
//! aggregation pass.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    GroupSchedule, Lesson, TeacherSchedule, WeeklySchedule, Weekday, FIELD_SEPARATOR,
};

/// Merge identity of a lesson within one teacher's day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub index: u32,
    pub name: String,
    pub week: u8,
}

impl MergeKey {
    pub fn of(lesson: &Lesson) -> Self {
        Self {
            index: lesson.index,
            name: lesson.name.clone(),
            week: lesson.merge_week(),
        }
    }
}

/// Teacher → weekly schedule, filled group by group
#[derive(Debug, Default)]
pub struct TeacherAccumulator {
    schedules: BTreeMap<String, WeeklySchedule>,
    groups_seen: usize,
}

impl TeacherAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribute the lessons of one group among their teachers
    pub fn add_group(&mut self, group: &GroupSchedule) {
        self.groups_seen += 1;

        for (day, schedule) in group.schedule.days() {
            for lesson in &schedule.classes {
                self.add_lesson(&group.group, day, lesson);
            }
        }
    }

    fn add_lesson(&mut self, group: &str, day: Weekday, lesson: &Lesson) {
        for teacher in lesson.teachers() {
            let mut copy = lesson.clone();
            copy.group = Some(group.to_string());

            self.schedules
                .entry(teacher.to_string())
                .or_insert_with(WeeklySchedule::empty)
                .day_mut(day)
                .classes
                .push(copy);
        }
    }

    /// Number of distinct teachers registered so far
    pub fn teacher_count(&self) -> usize {
        self.schedules.len()
    }

    /// Merge, sort and hand out the finished schedules, ordered by teacher
    pub fn finish(self) -> Vec<TeacherSchedule> {
        tracing::debug!(
            groups = self.groups_seen,
            teachers = self.schedules.len(),
            "Finishing teacher aggregation"
        );

        self.schedules
            .into_iter()
            .map(|(teacher, mut schedule)| {
                for day in Weekday::ALL {
                    let day_schedule = schedule.day_mut(day);
                    day_schedule.classes = merge_lessons(std::mem::take(&mut day_schedule.classes));
                    day_schedule.sort_by_index();
                }
                TeacherSchedule { teacher, schedule }
            })
            .collect()
    }
}

/// Merge lessons sharing a [`MergeKey`], keeping first-seen order
///
/// # Examples
///
/// ```
/// use rozklad::models::Lesson;
/// use rozklad::teachers::merge_lessons;
///
/// let a = Lesson { group: Some("КН-41".into()), ..Lesson::new(5, "ІПЗПКТ") };
/// let b = Lesson { group: Some("КТ-12м".into()), ..Lesson::new(5, "ІПЗПКТ") };
///
/// let merged = merge_lessons(vec![a, b]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].group.as_deref(), Some("КН-41|КТ-12м"));
/// ```
pub fn merge_lessons(lessons: Vec<Lesson>) -> Vec<Lesson> {
    let mut merged: Vec<Lesson> = Vec::with_capacity(lessons.len());
    let mut positions: HashMap<MergeKey, usize> = HashMap::new();

    for lesson in lessons {
        let key = MergeKey::of(&lesson);
        match positions.get(&key) {
            Some(&position) => append_group(&mut merged[position], lesson.group.as_deref()),
            None => {
                positions.insert(key, merged.len());
                merged.push(lesson);
            }
        }
    }

    merged
}

fn append_group(target: &mut Lesson, group: Option<&str>) {
    let Some(group) = group else { return };
    match target.group.as_mut() {
        Some(existing) => {
            existing.push(FIELD_SEPARATOR);
            existing.push_str(group);
        }
        None => target.group = Some(group.to_string()),
    }
}

/// Build every teacher schedule from a set of group schedules
///
/// Group order decides merge order, and so the order of names in merged
/// `group` fields.
pub fn aggregate<'a>(groups: impl IntoIterator<Item = &'a GroupSchedule>) -> Vec<TeacherSchedule> {
    let mut accumulator = TeacherAccumulator::new();
    for group in groups {
        accumulator.add_group(group);
    }
    accumulator.finish()
}

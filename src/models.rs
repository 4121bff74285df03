// Core data structures for rozklad schedules

use serde::{Deserialize, Deserializer, Serialize};

/// Separator used inside multi-valued text fields (rooms, teachers, groups)
pub const FIELD_SEPARATOR: char = '|';

/// One class occupying a time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub index: u32, // Time slot (period number)
    pub name: String,
    pub room: Option<String>,
    pub qualification: Option<String>,
    pub teacher: Option<String>,
    pub label: Option<f64>, // Disambiguation tag of a split biweekly pair
    pub is_biweekly: Option<bool>,
    pub week: Option<u8>,

    /// Owning group(s); only present in teacher schedules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Lesson {
    /// Create a plain (weekly) lesson
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach a biweekly label; sets `is_biweekly` and `week` accordingly
    pub fn with_label(mut self, label: u8) -> Self {
        self.label = Some(f64::from(label));
        self.is_biweekly = Some(true);
        self.week = Some(label);
        self
    }

    /// Teachers named in the `teacher` field, split on the field separator
    pub fn teachers(&self) -> Vec<&str> {
        self.teacher
            .as_deref()
            .map(|field| {
                field
                    .split(FIELD_SEPARATOR)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Week used when merging lessons across groups (weekly lessons count as week 1)
    pub fn merge_week(&self) -> u8 {
        self.week.unwrap_or(1)
    }
}

/// Lessons of one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DaySchedule {
    pub classes: Vec<Lesson>,
}

impl DaySchedule {
    pub fn new(classes: Vec<Lesson>) -> Self {
        Self { classes }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Stable sort by time slot
    pub fn sort_by_index(&mut self) {
        self.classes.sort_by_key(|lesson| lesson.index);
    }
}

// Older schedule files store an empty day as a bare list instead of an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum DayRepr {
    Wrapped { classes: Vec<Lesson> },
    Bare(Vec<Lesson>),
}

impl<'de> Deserialize<'de> for DaySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let classes = match DayRepr::deserialize(deserializer)? {
            DayRepr::Wrapped { classes } | DayRepr::Bare(classes) => classes,
        };
        Ok(Self { classes })
    }
}

/// Canonical teaching weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in calendar order
    pub const ALL: [Weekday; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Day labels exactly as they appear in source documents
    pub const LABELS: [&'static str; 5] = ["Понеділок", "Вівторок", "Середа", "Четвер", "П’ятниця"];

    /// JSON key for this day
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
        }
    }

    /// Source-document label
    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }

    /// Exact match against the canonical source labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|candidate| *candidate == label)
            .map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monday..friday schedule; serializes with the days in calendar order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub monday: DaySchedule,
    #[serde(default)]
    pub tuesday: DaySchedule,
    #[serde(default)]
    pub wednesday: DaySchedule,
    #[serde(default)]
    pub thursday: DaySchedule,
    #[serde(default)]
    pub friday: DaySchedule,
}

impl WeeklySchedule {
    /// Schedule with every day present and empty
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// Iterate days in calendar order
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    /// Total lessons across the week
    pub fn lesson_count(&self) -> usize {
        self.days().map(|(_, day)| day.classes.len()).sum()
    }
}

/// Weekly schedule of one student group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSchedule {
    pub group: String,
    pub schedule: WeeklySchedule,
}

impl GroupSchedule {
    pub fn new(group: impl Into<String>, schedule: WeeklySchedule) -> Self {
        Self {
            group: group.into(),
            schedule,
        }
    }
}

/// Weekly schedule of one teacher, derived from group schedules
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherSchedule {
    pub teacher: String,
    pub schedule: WeeklySchedule,
}

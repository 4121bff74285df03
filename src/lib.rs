//! rozklad - university timetable converter
//!
//! Reads timetable documents in which every column is a student group and
//! every cell is free text (`Л.203 Фізика доц. Іванов І. П.`), and writes one
//! JSON schedule per group plus one per teacher.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - DOCX/HTML documents → [`table::Table`]
//! - [`parser`] - field extraction from cell text
//! - [`schedule`] - header normalization, weekday segmentation, group schedules
//! - [`matching`] - approximate matching of weekday labels
//! - [`teachers`] - teacher schedules aggregated from group schedules
//! - [`storage`] - JSON files and folder batching
//! - [`pipeline`] - batch orchestration
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use rozklad::config::Config;
//! use rozklad::pipeline::{export_teacher_schedules, ConversionPipeline};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     ConversionPipeline::new(config.pipeline()).run_directory()?;
//!     export_teacher_schedules(&config.output.groups_dir, &config.output.teachers_dir)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod schedule;
pub mod source;
pub mod storage;
pub mod table;
pub mod teachers;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{
        DaySchedule, GroupSchedule, Lesson, TeacherSchedule, WeeklySchedule, Weekday,
    };
    pub use crate::parser::{extract_fields, CellFields};
    pub use crate::pipeline::{export_teacher_schedules, ConversionPipeline, RunStats};
    pub use crate::storage::ScheduleStore;
    pub use crate::table::Table;
}

// Direct re-exports for convenience
pub use models::{GroupSchedule, Lesson, TeacherSchedule, WeeklySchedule};

//! Batch conversion: documents → group schedules → teacher schedules
//!
//! Documents are converted one at a time. Every group column of a document
//! is built and written before the next document is opened, and the first
//! error aborts the run. Teacher aggregation is a separate, later stage that
//! reads the finished group output back from disk.
//!
//! # Example
//!
//! ```no_run
//! use rozklad::pipeline::{ConversionPipeline, PipelineConfig};
//!
//! # fn example() -> rozklad::error::Result<()> {
//! let pipeline = ConversionPipeline::new(PipelineConfig::default());
//! let stats = pipeline.run_directory()?;
//! println!("Wrote {} group schedules", stats.groups);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::matching::RatioMatcher;
use crate::models::GroupSchedule;
use crate::schedule::builder::DEFAULT_PLACEHOLDER_PREFIX;
use crate::schedule::days::DEFAULT_SIMILARITY_THRESHOLD;
use crate::schedule::{DaySegmenter, PreparedTable, ScheduleBuilder};
use crate::source::{discover_documents, load_table};
use crate::storage::{group_into_folders, load_group_schedules, ScheduleStore};
use crate::table::Table;
use crate::teachers::TeacherAccumulator;
use crate::utils::display_name;

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the source documents
    pub documents_dir: PathBuf,

    /// Accepted document extensions
    pub extensions: Vec<String>,

    /// Directory for group schedule files
    pub output_dir: PathBuf,

    /// Batch group files into `groupN` folders after the run
    pub group_into_folders: bool,

    /// Files per folder when batching
    pub schedules_per_folder: usize,

    /// Similarity a weekday label must exceed to be corrected
    pub similarity_threshold: u8,

    /// Prefix of placeholder cells
    pub placeholder_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("./word_schedules"),
            extensions: vec!["docx".to_string()],
            output_dir: PathBuf::from("./output_json"),
            group_into_folders: false,
            schedules_per_folder: 20,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
        }
    }
}

// ============================================================================
// Run Statistics
// ============================================================================

/// Counters of one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Documents converted
    pub documents: usize,

    /// Group schedules written
    pub groups: usize,

    /// Lessons across all written schedules
    pub lessons: usize,

    /// Table rows skipped for lacking a weekday or period
    pub skipped_rows: usize,

    /// Folders created by the batching pass
    pub folders: usize,
}

impl RunStats {
    fn absorb(&mut self, other: RunStats) {
        self.documents += other.documents;
        self.groups += other.groups;
        self.lessons += other.lessons;
        self.skipped_rows += other.skipped_rows;
    }
}

// ============================================================================
// Pipeline Implementation
// ============================================================================

/// Converts timetable documents into group schedule files
pub struct ConversionPipeline {
    config: PipelineConfig,
    segmenter: DaySegmenter<RatioMatcher>,
    builder: ScheduleBuilder,
}

impl ConversionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let segmenter = DaySegmenter::new(RatioMatcher::new(), config.similarity_threshold);
        let builder = ScheduleBuilder::new(config.placeholder_prefix.clone());
        Self {
            config,
            segmenter,
            builder,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert every document of the configured input directory
    pub fn run_directory(&self) -> Result<RunStats> {
        let documents = discover_documents(&self.config.documents_dir, &self.config.extensions)?;
        tracing::info!(
            dir = %self.config.documents_dir.display(),
            count = documents.len(),
            "Discovered documents"
        );
        self.run(&documents)
    }

    /// Convert the given documents in order, then batch output if enabled
    pub fn run(&self, documents: &[PathBuf]) -> Result<RunStats> {
        let store = ScheduleStore::new(&self.config.output_dir)?;
        let mut stats = RunStats::default();

        for (i, document) in documents.iter().enumerate() {
            tracing::info!(
                document = %display_name(document),
                progress = %format!("{}/{}", i + 1, documents.len()),
                "Parsing document"
            );
            stats.absorb(self.convert_document(document, &store)?);
        }

        if self.config.group_into_folders {
            stats.folders =
                group_into_folders(store.output_dir(), self.config.schedules_per_folder)?;
        }

        tracing::info!(
            documents = stats.documents,
            groups = stats.groups,
            lessons = stats.lessons,
            skipped_rows = stats.skipped_rows,
            "Conversion finished"
        );
        Ok(stats)
    }

    /// Convert one document and write its group schedules
    pub fn convert_document(&self, path: &Path, store: &ScheduleStore) -> Result<RunStats> {
        let table = load_table(path)?;
        let schedules = self.convert_table(&display_name(path), table)?;

        let mut stats = RunStats {
            documents: 1,
            ..Default::default()
        };
        for schedule in &schedules.groups {
            store.save_group(schedule)?;
            stats.groups += 1;
            stats.lessons += schedule.schedule.lesson_count();
        }
        stats.skipped_rows = schedules.skipped_rows;

        Ok(stats)
    }

    /// Build every group schedule of one table without writing anything
    ///
    /// Fails before producing any schedule when the table has no group
    /// columns.
    pub fn convert_table(&self, document: &str, table: Table) -> Result<DocumentSchedules> {
        let prepared = PreparedTable::prepare(document, table, &self.segmenter)?;
        tracing::info!(document, groups = ?prepared.groups(), "Found groups");

        let groups = prepared
            .groups()
            .iter()
            .map(|group| {
                self.builder
                    .build(&prepared, group)
                    .map(|schedule| GroupSchedule::new(group.clone(), schedule))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DocumentSchedules {
            groups,
            skipped_rows: prepared.skipped_rows(),
        })
    }
}

/// Group schedules built from one document
#[derive(Debug, Clone)]
pub struct DocumentSchedules {
    pub groups: Vec<GroupSchedule>,
    pub skipped_rows: usize,
}

// ============================================================================
// Teacher Aggregation
// ============================================================================

/// Read every group schedule under `groups_dir` and write one schedule per
/// teacher into `teachers_dir`
///
/// Returns the number of teacher schedules written.
pub fn export_teacher_schedules(groups_dir: &Path, teachers_dir: &Path) -> Result<usize> {
    let groups = load_group_schedules(groups_dir)?;
    tracing::info!(
        dir = %groups_dir.display(),
        groups = groups.len(),
        "Loaded group schedules"
    );

    let mut accumulator = TeacherAccumulator::new();
    for group in &groups {
        accumulator.add_group(group);
    }
    tracing::info!(teachers = accumulator.teacher_count(), "Registered teachers");

    let store = ScheduleStore::new(teachers_dir)?;
    let teachers = accumulator.finish();
    for teacher in &teachers {
        store.save_teacher(teacher)?;
    }

    tracing::info!(
        dir = %teachers_dir.display(),
        count = teachers.len(),
        "Teacher schedules written"
    );
    Ok(teachers.len())
}

//! Table → group schedules
//!
//! - [`columns`] - header normalization and group column discovery
//! - [`days`] - weekday segmentation of rows
//! - [`builder`] - per-group lesson lists
//!
//! [`PreparedTable`] is the shared, read-only view every group column is
//! built from: normalized headers plus the weekday and period of each row.

pub mod builder;
pub mod columns;
pub mod days;

pub use builder::ScheduleBuilder;
pub use columns::{extract_group_names, normalize_columns, DAY_COLUMN, PERIOD_COLUMN};
pub use days::DaySegmenter;

use crate::error::{Error, Result};
use crate::matching::ApproximateMatcher;
use crate::models::Weekday;
use crate::parser::patterns::PERIOD_REGEX;
use crate::table::Table;

/// A normalized table with every row placed on a weekday and period
#[derive(Debug, Clone)]
pub struct PreparedTable {
    document: String,
    table: Table,
    groups: Vec<String>,
    /// Per row: weekday and period, or `None` for rows that are skipped
    slots: Vec<Option<(Weekday, u32)>>,
}

impl PreparedTable {
    /// Normalize `table` and place its rows
    ///
    /// Fails with [`Error::NoGroupColumns`] when no header looks like a
    /// student group.
    pub fn prepare<M: ApproximateMatcher>(
        document: &str,
        mut table: Table,
        segmenter: &DaySegmenter<M>,
    ) -> Result<Self> {
        normalize_columns(&mut table, document)?;

        let groups = extract_group_names(&table);
        if groups.is_empty() {
            return Err(Error::NoGroupColumns {
                document: document.to_string(),
            });
        }

        let days = segmenter.segment(table.column(0));
        let periods: Vec<Option<u32>> = table.column(1).map(parse_period).collect();

        let slots = days
            .into_iter()
            .zip(periods)
            .enumerate()
            .map(|(row, slot)| match slot {
                (Some(day), Some(period)) => Some((day, period)),
                (None, _) => {
                    tracing::warn!(document, row, "Row has no recognizable weekday, skipping");
                    None
                }
                (Some(day), None) => {
                    tracing::warn!(document, row, day = %day, "Row has no period number, skipping");
                    None
                }
            })
            .collect();

        Ok(Self {
            document: document.to_string(),
            table,
            groups,
            slots,
        })
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Group column names, in column order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Rows that were not placed on any weekday/period
    pub fn skipped_rows(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Rows of `day` as (row number, period), in table order
    pub fn rows_for(&self, day: Weekday) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(row, slot)| match slot {
                Some((row_day, period)) if *row_day == day => Some((row, *period)),
                _ => None,
            })
    }

    /// Text of one cell
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.table
            .rows()
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }
}

/// Period number of a row: the first run of digits in the cell
pub fn parse_period(cell: Option<&str>) -> Option<u32> {
    cell.and_then(|text| PERIOD_REGEX.find(text))
        .and_then(|digits| digits.as_str().parse().ok())
}

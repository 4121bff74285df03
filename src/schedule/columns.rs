//! Column header normalization
//!
//! Timetable headers are `День | Пара | <group> | <group> ...`, but the
//! first two headers are often blank or spelled differently, and a group
//! split across two columns arrives as `ТП-5м` and `ТП-5м.1` after header
//! mangling. Normalization fixes all of that in place.

use regex::Captures;

use crate::error::{Error, Result};
use crate::parser::patterns::{DUPLICATE_SUFFIX_REGEX, GROUP_NAME_REGEX};
use crate::table::Table;

/// Canonical name of the weekday column
pub const DAY_COLUMN: &str = "День";

/// Canonical name of the period column
pub const PERIOD_COLUMN: &str = "Пара";

/// True if a header names a student group (`КН-41`, `ТП-5м.1`)
pub fn is_group_name(name: &str) -> bool {
    GROUP_NAME_REGEX.is_match(name)
}

/// Rewrite duplicate suffixes of a group header: `ТП-5м.1` → `ТП-5м_2`
///
/// Headers that are not group names are returned unchanged.
pub fn correct_group_name(name: &str) -> String {
    if is_group_name(name) {
        DUPLICATE_SUFFIX_REGEX
            .replace_all(name, |caps: &Captures| {
                let digit = caps[1].parse::<u32>().unwrap_or(0);
                format!("_{}", digit + 1)
            })
            .into_owned()
    } else {
        name.to_string()
    }
}

/// Normalize the header of a freshly read table
///
/// Drops columns with no data, corrects group headers, then renames the
/// first two columns to [`DAY_COLUMN`] and [`PERIOD_COLUMN`].
pub fn normalize_columns(table: &mut Table, document: &str) -> Result<()> {
    let dropped = table.drop_empty_columns();
    if dropped > 0 {
        tracing::debug!(document, dropped, "Dropped empty columns");
    }

    table.map_columns(correct_group_name);

    if table.width() < 2 {
        return Err(Error::malformed(
            document,
            format!("expected day and period columns, found {} column(s)", table.width()),
        ));
    }

    table.rename_column(0, DAY_COLUMN);
    table.rename_column(1, PERIOD_COLUMN);
    Ok(())
}

/// Group columns of a normalized table, in column order
pub fn extract_group_names(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .skip(2)
        .filter(|name| is_group_name(name))
        .cloned()
        .collect()
}

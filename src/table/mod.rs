//! Generic tabular abstraction shared by the document readers and the
//! schedule builder
//!
//! A [`Table`] is an ordered list of column names plus ordered rows of
//! optional cell text. Readers produce a raw cell grid; [`Table::from_grid`]
//! turns its first row into the header the same way spreadsheet-style
//! readers do: blank header cells become `Unnamed: <i>` and repeated names
//! receive `.1`, `.2`, ... suffixes.

use std::collections::HashMap;

/// A raw grid of cells as produced by a document reader
pub type Grid = Vec<Vec<Option<String>>>;

/// Header-addressed table of optional text cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create a table from explicit columns and rows
    ///
    /// Rows shorter than the header are padded with `None`; longer rows are
    /// truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table whose header is the first row of `grid`
    ///
    /// Returns `None` when the grid has no rows at all.
    pub fn from_grid(mut grid: Grid) -> Option<Self> {
        if grid.is_empty() {
            return None;
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut header = grid.remove(0);
        header.resize(width, None);

        let columns = mangle_header(header);
        Some(Self::new(columns, grid))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cells of the column at `index`, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Cells of a column looked up by name
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        self.column_index(name).map(|i| self.column(i).collect())
    }

    /// Rename the column at `index`
    pub fn rename_column(&mut self, index: usize, name: impl Into<String>) {
        if let Some(column) = self.columns.get_mut(index) {
            *column = name.into();
        }
    }

    /// Rewrite every column name with `rename`
    pub fn map_columns(&mut self, mut rename: impl FnMut(&str) -> String) {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Remove columns whose data cells are all absent
    ///
    /// Header text does not count as data. Returns the number of columns
    /// removed.
    pub fn drop_empty_columns(&mut self) -> usize {
        let keep: Vec<bool> = (0..self.width())
            .map(|i| self.column(i).any(|cell| cell.is_some()))
            .collect();

        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        self.columns = retain_by_mask(std::mem::take(&mut self.columns), &keep);
        self.rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|row| retain_by_mask(row, &keep))
            .collect();

        removed
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Turn raw header cells into unique column names
pub fn mangle_header(header: Vec<Option<String>>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = cell
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| format!("Unnamed: {i}"));

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Convert raw cell text into an optional cell: blank text is absent
pub fn cell_from_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

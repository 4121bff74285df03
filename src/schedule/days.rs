//! Weekday assignment for table rows
//!
//! The day column carries a label only on the first row of each day block.
//! Labels are forward-filled, cleaned of spacing and right-to-left
//! reversal artifacts, then matched against the canonical weekday names
//! with a similarity threshold.

use crate::matching::ApproximateMatcher;
use crate::models::Weekday;

/// Similarity a misspelled label must exceed to be corrected
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

/// Assigns rows to weekdays
#[derive(Debug, Clone)]
pub struct DaySegmenter<M> {
    matcher: M,
    threshold: u8,
}

impl<M: ApproximateMatcher> DaySegmenter<M> {
    pub fn new(matcher: M, threshold: u8) -> Self {
        Self { matcher, threshold }
    }

    /// Weekday of every row, in row order
    ///
    /// Rows before the first label, and rows whose label cannot be
    /// corrected, get `None`.
    pub fn segment<'a>(
        &self,
        cells: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Vec<Option<Weekday>> {
        forward_fill(cells)
            .into_iter()
            .map(|label| label.and_then(|label| self.resolve(&label)))
            .collect()
    }

    /// Map one raw label to a weekday
    pub fn resolve(&self, raw: &str) -> Option<Weekday> {
        let label = clean_label(raw);
        let corrected = self.correct_spelling(&label);
        let day = Weekday::from_label(corrected);

        if day.is_none() {
            tracing::debug!(label = %raw, "Unrecognized weekday label");
        }
        day
    }

    /// Closest canonical label if it is similar enough, else the input
    pub fn correct_spelling<'a>(&self, label: &'a str) -> &'a str {
        if Weekday::from_label(label).is_some() {
            return label;
        }

        match self.matcher.best_match(label, &Weekday::LABELS) {
            Some(found) if found.score > self.threshold => {
                tracing::debug!(
                    from = label,
                    to = found.choice,
                    score = found.score,
                    "Corrected weekday label"
                );
                found.choice
            }
            _ => label,
        }
    }
}

/// Repeat the last present label into the blank cells below it
pub fn forward_fill<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> Vec<Option<String>> {
    let mut last: Option<String> = None;
    cells
        .into_iter()
        .map(|cell| {
            if let Some(text) = cell.filter(|text| !text.trim().is_empty()) {
                last = Some(text.to_string());
            }
            last.clone()
        })
        .collect()
}

/// Remove whitespace; reverse labels that end in an uppercase letter
///
/// Vertical day labels sometimes come out of the document reversed
/// (`коліденоП`), which is detectable by the capital at the end.
pub fn clean_label(label: &str) -> String {
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.chars().last().is_some_and(char::is_uppercase) {
        compact.chars().rev().collect()
    } else {
        compact
    }
}

//! Cell text parsing
//!
//! Turns the free text of one timetable cell into structured lesson fields.
//!
//! - [`fields`] - ordered find/record/strip extraction passes
//! - [`patterns`] - regexes for rooms, ranks, teacher names, group headers
//! - [`sanitize`] - normalization applied to every extracted field

pub mod fields;
pub mod patterns;
pub mod sanitize;

pub use fields::{extract_fields, CellFields};

//! Integration tests module
//!
//! End-to-end tests of the rozklad converter, including:
//! - DOCX/HTML documents → group schedule files
//! - Group schedule files → teacher schedule files
//! - Error handling for malformed input

pub mod aggregation_test;
pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;

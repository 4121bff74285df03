pub mod parse;
pub mod teachers;

// Re-export command functions for convenience
pub use parse::parse;
pub use teachers::teachers;

//! Output artifact for grouping runs.

pub mod writer;

pub use writer::GroupWriter;

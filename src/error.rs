//! Error types for the rowgroup library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`RowGroupError`] enum. Malformed input lines are never errors; they are
//! counted and skipped by the row-set builder.
//!
//! # Examples
//!
//! ```
//! use rowgroup::error::{Result, RowGroupError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RowGroupError::other("something went wrong"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for rowgroup operations.
#[derive(Error, Debug)]
pub enum RowGroupError {
    /// I/O errors while reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not resolve to an existing file.
    #[error("File {} not found", .0.display())]
    InputNotFound(PathBuf),

    /// The line validation pattern could not be compiled.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// The output artifact could not be committed.
    #[error("Output error: {0}")]
    Output(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with RowGroupError.
pub type Result<T> = std::result::Result<T, RowGroupError>;

impl RowGroupError {
    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        RowGroupError::Pattern(msg.into())
    }

    /// Create a new output error.
    pub fn output<S: Into<String>>(msg: S) -> Self {
        RowGroupError::Output(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RowGroupError::Other(msg.into())
    }

    /// Create a new not found error for an input path.
    pub fn not_found<P: Into<PathBuf>>(path: P) -> Self {
        RowGroupError::InputNotFound(path.into())
    }
}

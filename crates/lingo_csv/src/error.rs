//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`std::str::Utf8Error`]
    #[error(transparent)]
    #[diagnostic(help("source tables must be encoded as UTF-8"))]
    Utf8Error(#[from] std::str::Utf8Error),

    /// The source has no header row
    #[error("source table has no header row")]
    MissingHeader,

    /// A required column is absent from the header
    #[error("column `{column}` not found in header")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// A data row has fewer cells than the column being accessed
    #[error("row {row} has no cell at column index {index}")]
    ShortRow {
        /// Zero based row number, the header being row 0
        row: usize,
        /// Index of the column being accessed
        index: usize,
    },

    /// A row could not be split into fields
    #[error("row {row} is malformed, check for an unterminated quote")]
    MalformedRow {
        /// Zero based row number, the header being row 0
        row: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`std::string::FromUtf8Error`]
    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    /// Transparent warpper for [`tempfile::PersistError`]
    #[error(transparent)]
    PersistError(#[from] tempfile::PersistError),

    /// a length does not fit in the 32 bit fields of the table
    #[error("length {length} does not fit in a string table")]
    TooLarge {
        /// The offending length in bytes or entries
        length: usize,
    },

    /// file is an invalid string table
    #[error("file is an invalid string table: {0}")]
    InvalidTable(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

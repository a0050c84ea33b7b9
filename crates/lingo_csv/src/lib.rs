//! # Source Table Documentation
//!
//! This crate reads the localization source tables that every compiled string table is built
//! from. A source table is UTF-8 text with comma-separated fields. The first row names the
//! columns, and every following row holds one string in each language.
//!
//! ## Layout
//!
//! | Column      | Description                                                  |
//! |-------------|--------------------------------------------------------------|
//! | `key`       | Identifier the runtime looks strings up by                   |
//! | language    | One column per language tag, for example `en` or `zh-Hant`   |
//!
//! ```text
//! key,en,zh-Hant
//! title,Antkeeper,螞蟻飼養員
//! back,Back,
//! ```
//!
//! ## Rules
//!
//! - Fields may be double-quoted. Quoted fields can hold commas and line breaks, and `""`
//!   stands for a single quote.
//! - Rows with an empty key are ignored.
//! - An empty value becomes `$` followed by the key, marking the string as untranslated.
//! - Columns are matched by exact name, and a missing column is an error.
//!

pub mod coverage;
pub mod error;
pub mod parse;
pub mod table;

pub use coverage::Coverage;
pub use table::{Entries, Entry, LoaderOptions, SourceTable};

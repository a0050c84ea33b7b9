//! Types for reading source tables and extracting string entries
//!

use bon::Builder;
use derive_more::derive::{Constructor, Display};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::parse::parse_rows;

/// Options controlling how entries are pulled out of a [`SourceTable`]
#[derive(Debug, Clone, Builder)]
pub struct LoaderOptions {
    /// Name of the column holding the string keys
    #[builder(into, default = String::from("key"))]
    pub key_column: String,

    /// Prefix placed before the key when a value is missing
    #[builder(into, default = String::from("$"))]
    pub fallback_prefix: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions::builder().build()
    }
}

/// A single key and its value for one language
#[derive(Constructor, Display, Debug, Clone, PartialEq, Eq)]
#[display("{key}: {value}")]
pub struct Entry {
    /// String key, never empty
    pub key: String,
    /// Translated value, or the fallback built from the key
    pub value: String,
}

/// A comma-separated source table held in memory
///
/// ```no_run
/// fn list_entries(path: &str) -> lingo_csv::error::Result<()> {
///     let table = lingo_csv::SourceTable::open(path)?;
///
///     for entry in table.entries("en")? {
///         println!("{}", entry?);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Parse a table from UTF-8 text
    pub fn parse(text: &str) -> Result<SourceTable> {
        let mut rows = parse_rows(text)?.into_iter();
        let header = rows.next().ok_or(Error::MissingHeader)?;

        Ok(SourceTable {
            header,
            rows: rows.collect(),
        })
    }

    /// Parse a table from raw bytes, rejecting anything that is not UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<SourceTable> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    /// Read and parse a table from disk
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<SourceTable> {
        let mut buffer = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut buffer)?;

        let table = Self::from_bytes(&buffer)?;
        debug!(
            columns = table.header.len(),
            rows = table.rows.len(),
            "loaded source table"
        );

        Ok(table)
    }

    /// The column names of this table
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The data rows of this table, excluding the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this table has no data rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the index of a column by its exact name
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::ColumnNotFound {
                column: name.to_owned(),
            })
    }

    /// Iterate the entries for `language` using the default [`LoaderOptions`]
    pub fn entries(&self, language: &str) -> Result<Entries<'_>> {
        self.entries_with(language, &LoaderOptions::default())
    }

    /// Iterate the entries for `language`
    ///
    /// Both columns are resolved before any row is visited. Rows with an empty key are
    /// skipped, and an empty value is replaced by the fallback prefix followed by the key.
    pub fn entries_with(&self, language: &str, options: &LoaderOptions) -> Result<Entries<'_>> {
        let key = self.column(&options.key_column)?;
        let value = self.column(language)?;

        Ok(Entries {
            rows: self.rows.iter().enumerate(),
            key,
            value,
            fallback_prefix: options.fallback_prefix.clone(),
        })
    }
}

pub(crate) fn cell(row: &[String], number: usize, index: usize) -> Result<&str> {
    row.get(index)
        .map(String::as_str)
        .ok_or(Error::ShortRow {
            row: number + 1,
            index,
        })
}

/// Iterator over the [`Entry`] values of one language column
#[derive(Debug)]
pub struct Entries<'a> {
    rows: std::iter::Enumerate<std::slice::Iter<'a, Vec<String>>>,
    key: usize,
    value: usize,
    fallback_prefix: String,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        for (number, row) in self.rows.by_ref() {
            let key = match cell(row, number, self.key) {
                Ok(key) => key,
                Err(e) => return Some(Err(e)),
            };
            if key.is_empty() {
                continue;
            }

            let value = match cell(row, number, self.value) {
                Ok(value) => value,
                Err(e) => return Some(Err(e)),
            };

            let value = if value.is_empty() {
                format!("{}{}", self.fallback_prefix, key)
            } else {
                value.to_owned()
            };

            return Some(Ok(Entry::new(key.to_owned(), value)));
        }

        None
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::{Entry, LoaderOptions, SourceTable};
    use crate::error::{Error, Result};

    const TABLE: &str = "key,en,zh-Hant\n\
        title,Antkeeper,螞蟻飼養員\n\
        ,Orphan,孤兒\n\
        back,Back,\n";

    fn collect(table: &SourceTable, language: &str) -> Result<Vec<Entry>> {
        table.entries(language)?.collect()
    }

    #[test]
    fn table_header_and_rows() -> Result<()> {
        let table = SourceTable::parse(TABLE)?;
        assert_eq!(table.header(), ["key", "en", "zh-Hant"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.column("zh-Hant")?, 2);
        Ok(())
    }

    #[test]
    fn table_without_header() {
        assert!(matches!(SourceTable::parse(""), Err(Error::MissingHeader)));
    }

    #[test]
    fn table_header_only() -> Result<()> {
        let table = SourceTable::parse("key,en\n")?;
        assert!(table.is_empty());
        assert!(collect(&table, "en")?.is_empty());
        Ok(())
    }

    #[test]
    fn table_rejects_invalid_utf8() {
        let result = SourceTable::from_bytes(b"key,en\nback,\xff\n");
        assert!(matches!(result, Err(Error::Utf8Error(_))));
    }

    #[traced_test]
    #[test]
    fn entries_skip_empty_keys() -> Result<()> {
        let table = SourceTable::parse(TABLE)?;
        let entries = collect(&table, "en")?;

        assert_eq!(
            entries,
            vec![
                Entry::new("title".into(), "Antkeeper".into()),
                Entry::new("back".into(), "Back".into()),
            ]
        );
        Ok(())
    }

    #[traced_test]
    #[test]
    fn entries_fall_back_to_key() -> Result<()> {
        let table = SourceTable::parse(TABLE)?;
        let entries = collect(&table, "zh-Hant")?;

        assert_eq!(
            entries,
            vec![
                Entry::new("title".into(), "螞蟻飼養員".into()),
                Entry::new("back".into(), "$back".into()),
            ]
        );
        Ok(())
    }

    #[test]
    fn entries_with_custom_options() -> Result<()> {
        let table = SourceTable::parse("id,en\nquit,\n")?;
        let options = LoaderOptions::builder()
            .key_column("id")
            .fallback_prefix("#")
            .build();

        let entries = table
            .entries_with("en", &options)?
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(entries, vec![Entry::new("quit".into(), "#quit".into())]);
        Ok(())
    }

    #[test]
    fn entries_missing_language_column() -> Result<()> {
        let table = SourceTable::parse(TABLE)?;
        match table.entries("fr") {
            Err(Error::ColumnNotFound { column }) => assert_eq!(column, "fr"),
            other => panic!("expected missing column, got {:?}", other.map(|_| ())),
        }
        Ok(())
    }

    #[test]
    fn entries_missing_key_column() -> Result<()> {
        let table = SourceTable::parse("id,en\nback,Back\n")?;
        match table.entries("fr") {
            Err(Error::ColumnNotFound { column }) => assert_eq!(column, "key"),
            other => panic!("expected missing column, got {:?}", other.map(|_| ())),
        }
        Ok(())
    }

    #[test]
    fn entries_short_row() -> Result<()> {
        let table = SourceTable::parse("key,en,fr\nback,Back,Retour\nquit,Quit\n")?;
        let mut entries = table.entries("fr")?;

        assert!(entries.next().is_some_and(|e| e.is_ok()));
        assert!(matches!(
            entries.next(),
            Some(Err(Error::ShortRow { row: 2, index: 2 }))
        ));
        Ok(())
    }

    #[test]
    fn entry_display() {
        let entry = Entry::new("back".into(), "Back".into());
        assert_eq!(entry.to_string(), "back: Back");
    }
}

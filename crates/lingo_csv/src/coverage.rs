//! Translation coverage of one language relative to another
//!

use std::fmt;
use tracing::instrument;

use crate::error::Result;
use crate::table::{cell, LoaderOptions, SourceTable};

/// How many source strings have a translation in the target language
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Rows with a key and a source value
    pub total: usize,
    /// Of those, rows that also have a target value
    pub covered: usize,
}

impl Coverage {
    /// Percentage of covered rows, rounded half to even
    ///
    /// A table with nothing to translate is fully covered.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }

        let ratio = 100.0 * self.covered as f64 / self.total as f64;
        ratio.round_ties_even() as u32
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percent())
    }
}

impl SourceTable {
    /// Measure how much of the `source` language has been translated into `target`
    #[instrument(skip(self), ret)]
    pub fn coverage(&self, source: &str, target: &str) -> Result<Coverage> {
        let key = self.column(&LoaderOptions::default().key_column)?;
        let source = self.column(source)?;
        let target = self.column(target)?;

        let mut coverage = Coverage::default();
        for (number, row) in self.rows().iter().enumerate() {
            if cell(row, number, key)?.is_empty() || cell(row, number, source)?.is_empty() {
                continue;
            }

            coverage.total += 1;
            if !cell(row, number, target)?.is_empty() {
                coverage.covered += 1;
            }
        }

        Ok(coverage)
    }
}

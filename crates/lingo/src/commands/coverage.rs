use clap::Args;
use lingo_csv::SourceTable;
use miette::{Context, IntoDiagnostic, Result};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct CoverageArgs {
    /// An input source table
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The language column to measure
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// The language column translations are made from
    #[arg(short, long, default_value = "en")]
    source: String,
}

impl CoverageArgs {
    pub fn handle(&self) -> Result<()> {
        let table =
            SourceTable::open(&self.input).context(format!("path: {}", self.input.display()))?;
        let coverage = table.coverage(&self.source, &self.language)?;

        // A bare integer, without a trailing newline
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{coverage}").into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        Ok(())
    }
}

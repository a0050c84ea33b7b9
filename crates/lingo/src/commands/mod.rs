pub mod compile;
pub mod coverage;
pub mod diff;
pub mod export;
pub mod inspect;

use clap::ValueEnum;
use lingo_csv::{LoaderOptions, SourceTable};
use lingo_str::{Layout, StringMap, StringTableReader};
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::Path};
use tracing::debug;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Compile one language of a source table into a string table
    Compile(compile::CompileArgs),
    /// Print how much of a language has been translated, as a percentage
    Coverage(coverage::CoverageArgs),
    /// Compare two compiled string tables
    Diff(diff::DiffArgs),
    /// Write one language of a source table as a JSON object keyed by hash
    Export(export::ExportArgs),
    /// List the entries of a compiled string table
    Inspect(inspect::InspectArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Compile(compile) => compile.handle(),
            Commands::Coverage(coverage) => coverage.handle(),
            Commands::Diff(diff) => diff.handle(),
            Commands::Export(export) => export.handle(),
            Commands::Inspect(inspect) => inspect.handle(),
        }
    }
}

/// Binary layout of a compiled string table
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Count, then hash, length and bytes for each entry
    #[default]
    Inline,
    /// Value block, then a directory of hash and length pairs
    Split,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Inline => Layout::Inline,
            LayoutArg::Split => Layout::Split,
        }
    }
}

/// Load `input` and compile the entries of `language`
pub(crate) fn load_map(input: &Path, language: &str, key_column: &str) -> Result<StringMap> {
    let table = SourceTable::open(input).context(format!("path: {}", input.display()))?;

    let options = LoaderOptions::builder().key_column(key_column).build();
    let entries = table
        .entries_with(language, &options)?
        .map(|entry| entry.map(|e| (e.key, e.value)))
        .collect::<lingo_csv::error::Result<Vec<_>>>()?;

    let rows = entries.len();
    let map = StringMap::compile(entries);
    debug!(rows, entries = map.len(), "compiled {}", language);

    Ok(map)
}

/// Read a compiled string table from disk
pub(crate) fn read_table(path: &Path, layout: Layout) -> Result<StringTableReader> {
    let file = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    StringTableReader::new(file, layout).context(format!("reading {}", path.display()))
}

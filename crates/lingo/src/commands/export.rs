use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use tracing::info;

use super::load_map;

#[derive(Args)]
pub struct ExportArgs {
    /// An input source table
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The language column to export
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// A target JSON file
    #[arg(value_name = "FILE")]
    output: PathBuf,

    /// Name of the column holding the keys
    #[arg(long, default_value = "key")]
    key_column: String,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let map = load_map(&self.input, &self.language, &self.key_column)?;

        info!("creating {}", self.output.display());
        let out = File::create(&self.output)
            .into_diagnostic()
            .context(format!("creating {}", self.output.display()))?;

        let mut writer = BufWriter::new(out);
        serde_json::to_writer_pretty(&mut writer, &map)
            .into_diagnostic()
            .context(format!("writing {}", self.output.display()))?;
        writer.flush().into_diagnostic()?;

        Ok(())
    }
}

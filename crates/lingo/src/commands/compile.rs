use clap::Args;
use lingo_str::{write_file, WriterOptions};
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::{load_map, LayoutArg};

#[derive(Args)]
pub struct CompileArgs {
    /// An input source table
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The language column to compile
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// A target string table file
    #[arg(value_name = "FILE")]
    output: PathBuf,

    /// Binary layout of the output
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Inline)]
    layout: LayoutArg,

    /// Name of the column holding the keys
    #[arg(long, default_value = "key")]
    key_column: String,
}

impl CompileArgs {
    pub fn handle(&self) -> Result<()> {
        let map = load_map(&self.input, &self.language, &self.key_column)?;

        info!("creating {}", self.output.display());
        write_file(
            &self.output,
            &map,
            WriterOptions::builder().layout(self.layout.into()).build(),
        )
        .context(format!("creating {}", self.output.display()))?;

        Ok(())
    }
}

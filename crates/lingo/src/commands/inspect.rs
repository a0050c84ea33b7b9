use clap::Args;
use miette::Result;
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;

use super::{read_table, LayoutArg};

#[derive(Args)]
pub struct InspectArgs {
    /// An input string table file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Binary layout of the input
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Inline)]
    layout: LayoutArg,
}

impl InspectArgs {
    pub fn handle(&self) -> Result<()> {
        let table = read_table(&self.file, self.layout.into())?;

        for (hash, value) in table.entries() {
            let hash = format!("{hash:#010x}");
            println!(
                "{}\t{}",
                hash.if_supports_color(Stream::Stdout, |h| h.dimmed()),
                value.escape_debug()
            );
        }

        Ok(())
    }
}

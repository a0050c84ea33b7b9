use clap::{Args, ValueEnum};
use itertools::Itertools;
use lingo_str::StringMap;
use miette::Result;
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};
use std::{fmt::Display, path::PathBuf};

use super::{read_table, LayoutArg};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Only list which hashes changed
    #[default]
    Semantic,
    /// Also show how each modified value changed
    Full,
}

#[derive(Debug, Eq, PartialEq)]
enum Change {
    Added(u32, String),
    Removed(u32, String),
    Modified(u32, String, String),
}

impl Change {
    fn hash(&self) -> u32 {
        match self {
            Change::Added(hash, _) | Change::Removed(hash, _) | Change::Modified(hash, _, _) => {
                *hash
            }
        }
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Added(hash, v) => {
                write!(f, "✅ {:#010x} {}", hash, v.escape_debug().green())
            }
            Change::Removed(hash, v) => {
                write!(f, "❌ {:#010x} {}", hash, v.escape_debug().red())
            }
            Change::Modified(hash, old, new) => {
                write!(
                    f,
                    "🔃 {:#010x} {} vs {}",
                    hash,
                    old.escape_debug().red(),
                    new.escape_debug().green()
                )
            }
        }
    }
}

/// Collect every hash whose value differs between two tables, ordered by hash
fn changes(left: &StringMap, right: &StringMap) -> Vec<Change> {
    let added = right
        .iter()
        .filter(|(hash, _)| !left.contains_key(*hash))
        .map(|(hash, value)| Change::Added(*hash, value.clone()));

    let removed = left
        .iter()
        .filter(|(hash, _)| !right.contains_key(*hash))
        .map(|(hash, value)| Change::Removed(*hash, value.clone()));

    let modified = left.iter().filter_map(|(hash, old)| {
        right
            .get(hash)
            .filter(|new| *new != old)
            .map(|new| Change::Modified(*hash, old.clone(), new.clone()))
    });

    added
        .chain(removed)
        .chain(modified)
        .sorted_by_key(Change::hash)
        .collect()
}

/// Render a line by line comparison with the changed spans emphasized
fn inline_diff(old: &str, new: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);

    let mut lines = Vec::new();
    for op in diff.ops().iter() {
        for change in diff.iter_inline_changes(op) {
            let mut context = String::from(match change.tag() {
                ChangeTag::Delete => "- ",
                ChangeTag::Insert => "+ ",
                ChangeTag::Equal => "  ",
            });

            for (emphasized, value) in change.iter_strings_lossy() {
                let value = value.trim_end_matches('\n');
                if emphasized {
                    if change.tag() == ChangeTag::Insert {
                        context.push_str(&format!("{}", value.green().underline()));
                    } else {
                        context.push_str(&format!("{}", value.red().underline()));
                    }
                } else {
                    context.push_str(&format!("{}", value.dimmed()));
                }
            }
            lines.push(context);
        }
    }

    lines
}

#[derive(Args)]
pub struct DiffArgs {
    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input string table file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Binary layout of both inputs
    #[arg(long, value_enum, default_value_t = LayoutArg::Inline)]
    layout: LayoutArg,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = Mode::Semantic)]
    mode: Mode,
}

impl DiffArgs {
    pub fn handle(&self) -> Result<()> {
        let left = read_table(&self.left, self.layout.into())?;
        let right = read_table(&self.right, self.layout.into())?;

        for change in changes(left.entries(), right.entries()) {
            println!("{}", change);

            if let (Mode::Full, Change::Modified(_, old, new)) = (self.mode, &change) {
                println!("{}", inline_diff(old, new).iter().map(|l| "  ".to_string() + l).join("\n"));
            }
        }

        Ok(())
    }
}

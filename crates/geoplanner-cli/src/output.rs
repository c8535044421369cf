//! Output format selection for command results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text, one item per line.
    #[default]
    Text,
    /// A single line per result.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Write each line to stdout.
pub fn write_lines<I>(lines: I) -> anyhow::Result<()>
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in lines {
        writeln!(handle, "{line}")?;
    }
    Ok(())
}

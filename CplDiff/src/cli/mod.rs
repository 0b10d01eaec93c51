//! cpldiff CLI - compares the main image timelines of two CPL documents

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::cpl;
use crate::diff;

#[derive(Parser)]
#[command(name = "cpldiff", version)]
#[command(about = "Computes the difference between the timelines of two IMF Compositions", long_about = None)]
struct Cli {
    /// Path to the first CPL document
    cpl_old: PathBuf,

    /// Path to the second CPL document
    cpl_new: PathBuf,

    /// Log how each timeline was built
    #[arg(short, long)]
    verbose: bool,
}

/// Run the cpldiff CLI
///
/// # Errors
/// Returns an error if either CPL cannot be read, if the edit rates differ,
/// or if writing to stdout fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for opcodes
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    compare(&cli.cpl_old, &cli.cpl_new)
}

/// Print the opcodes turning the `old` timeline into the `new` one
fn compare(old: &Path, new: &Path) -> anyhow::Result<()> {
    let old_timeline = cpl::read_cpl(old)
        .with_context(|| format!("failed to read CPL {}", old.display()))?;
    let new_timeline = cpl::read_cpl(new)
        .with_context(|| format!("failed to read CPL {}", new.display()))?;

    let result = diff::diff_timelines(&old_timeline, &new_timeline)?;

    let mut out = io::stdout().lock();
    for opcode in &result.opcodes {
        writeln!(out, "{opcode}")?;
    }
    out.flush()?;

    tracing::debug!("{}", result.summary());
    Ok(())
}

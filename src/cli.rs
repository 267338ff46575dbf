//! Pieces shared by the `extract` and `select` binaries.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::column_set::ColumnSet;
use crate::config::{DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_LINES, ExtractOptions};
use crate::error::ExtractError;
use crate::line_source::open_inputs;
use crate::matcher::{MatchMode, build_matcher};
use crate::pipeline::{ExtractSummary, extract};
use crate::sink::OutputSink;

/// Options common to both front ends.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Maximum number of lines to read per file
    #[arg(short = 'n', long, value_name = "NLINES", default_value_t = DEFAULT_MAX_LINES)]
    pub max_lines: usize,

    /// Output buffer size in bytes; no single field may be larger
    #[arg(short = 'b', long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_size: usize,

    /// Log progress and a run summary on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Stan posterior CSV files, read in order (`-` for stdin)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl CommonArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            max_lines: self.max_lines,
            buffer_capacity: self.buffer_size,
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run an extraction writing to `dest`.
///
/// The matcher is built and the buffer size checked before any input is
/// opened, so argument mistakes never touch the filesystem.
pub fn run_to<S: AsRef<str>, W: Write>(
    mode: MatchMode,
    patterns: &[S],
    args: &CommonArgs,
    dest: W,
) -> Result<ExtractSummary, ExtractError> {
    let matcher = build_matcher(mode, patterns)?;
    let options = args.options();
    let mut sink = OutputSink::with_capacity(dest, options.buffer_capacity)?;
    let mut inputs = open_inputs(&args.files)?;
    let mut columns = ColumnSet::with_capacity(mode.initial_column_capacity());

    let summary = extract(
        &mut inputs,
        matcher.as_ref(),
        &mut columns,
        &mut sink,
        &options,
    )?;
    info!(
        files = summary.files_read,
        columns = summary.selected_columns,
        rows = summary.rows_written,
        bytes = summary.bytes_written,
        "extraction complete"
    );
    Ok(summary)
}

/// Run an extraction writing to standard output.
pub fn run<S: AsRef<str>>(
    mode: MatchMode,
    patterns: &[S],
    args: &CommonArgs,
) -> Result<ExtractSummary, ExtractError> {
    let stdout = io::stdout();
    run_to(mode, patterns, args, stdout.lock())
}

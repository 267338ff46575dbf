//! Pull columns out of Stan posterior CSV files by regular expression.
//!
//! Usage:
//!   extract [-h] [-n nlines] -s <regex> <file>...
//!
//! Example:
//!   extract -s '^alpha|^beta' -n 10 samples-chain_*.csv

use clap::Parser;
use posterior_extract::MatchMode;
use posterior_extract::cli::{self, CommonArgs};
use std::process;

/// Extracts given parameters from stan posterior csv file(s) based on regex
/// expression.
///
/// The header of the first file decides which columns are kept. Remaining
/// files must share its column layout; their headers are skipped.
#[derive(Parser)]
#[command(name = "extract")]
struct Cli {
    /// Target parameter regex (repeat to match any of several)
    #[arg(short = 's', long = "search", value_name = "REGEX", required = true)]
    search: Vec<String>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let args = Cli::parse();
    cli::init_tracing(args.common.verbose);

    if let Err(e) = cli::run(MatchMode::Regex, &args.search, &args.common) {
        eprintln!("extract: {e}");
        process::exit(e.exit_code());
    }
}

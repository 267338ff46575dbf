//! Pull named columns out of Stan posterior CSV files.
//!
//! Usage:
//!   select [-h] [-n nlines] -s <parameter>... <file>...
//!
//! Example:
//!   select -s alpha -s beta -n 10 samples-chain_*.csv

use clap::Parser;
use posterior_extract::MatchMode;
use posterior_extract::cli::{self, CommonArgs};
use std::process;

/// Extracts given parameters from stan posterior csv file(s) based on strict
/// matching.
#[derive(Parser)]
#[command(name = "select")]
struct Cli {
    /// Target parameter name. Can be specified multiple times.
    #[arg(short = 's', long = "search", value_name = "PARAMETER", required = true)]
    search: Vec<String>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let args = Cli::parse();
    cli::init_tracing(args.common.verbose);

    if let Err(e) = cli::run(MatchMode::Exact, &args.search, &args.common) {
        eprintln!("select: {e}");
        process::exit(e.exit_code());
    }
}

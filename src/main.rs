//! histql CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`; failures are
//! printed to stderr and exit non-zero.

use histql::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

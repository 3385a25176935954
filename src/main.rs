//! courselist CLI entry point
//!
//! Parses arguments, dispatches through `cli::run`, prints any error to
//! stderr and exits non-zero.

use courselist::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

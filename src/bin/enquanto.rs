//! Enquanto command-line driver
//!
//! Runs, checks or dumps Enquanto programs. See `enquanto --help`.
use enquanto::cli;

fn main() {
    match cli::run_cli() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use planeco_cli::CliError;

fn main() {
    match planeco_cli::run() {
        Ok(()) => {}
        // Help and version output are not failures.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("planeco: {err}");
            std::process::exit(1);
        }
    }
}

//! Entry point for the `tripscore` command-line interface.
#![forbid(unsafe_code)]

use tripscore_cli::CliError;

fn main() {
    match tripscore_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("tripscore: {err}");
            std::process::exit(1);
        }
    }
}

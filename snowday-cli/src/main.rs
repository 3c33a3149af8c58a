//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use snowday_cli::CliError;

fn main() {
    if let Err(err) = snowday_cli::run() {
        if let CliError::ArgumentParsing(usage) = &err {
            usage.exit();
        }
        eprintln!("snowday: {err}");
        std::process::exit(1);
    }
}

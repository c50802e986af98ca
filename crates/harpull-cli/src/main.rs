use harpull_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init_logging().expect("failed to initialize logging");

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("harpull error: {:#}", err);
        std::process::exit(1);
    }
}

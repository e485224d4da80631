use imgfetch_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    // Initialize logging as early as possible; the log file is optional.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    match Cli::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("imgfetch error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

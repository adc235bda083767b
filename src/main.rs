use imgrab::cli::Cli;
use imgrab::logging;

fn main() {
    // Initialize logging as early as possible; if the state dir is
    // unwritable, keep going with stderr-only logging.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("imgrab error: {:#}", err);
        std::process::exit(1);
    }
}

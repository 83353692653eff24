//! Sylvester-LP experiment.
//!
//! Loads `experiment.toml` from the working directory when present, runs
//! every enabled solver configuration and prints one `obj` and one `cost`
//! line per run.

use std::io;
use std::process::ExitCode;

use lpbench::ExperimentConfig;

fn main() -> ExitCode {
    lpbench::console::init();

    let config = ExperimentConfig::load("experiment.toml").unwrap_or_default();

    match lpbench::run_experiment(&config, io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

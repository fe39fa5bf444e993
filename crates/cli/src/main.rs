//! `codec-cli` entry point: `codec-cli encrypt|decrypt < input > output`.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`](config::Config) from `CODEC_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Run the requested operation from stdin to stdout.
//!
//! Any failure is reported as a JSON error body on stderr with a non-zero exit.

mod config;
mod run;
mod telemetry;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::error;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let body = run::error_response(&e);
            error!(code = %body.code, "codec-cli failed");
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("ERROR: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let op: run::Operation = std::env::args()
        .nth(1)
        .context("usage: codec-cli encrypt|decrypt")?
        .parse()?;

    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env()?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Operation
    // -----------------------------------------------------------------------
    run::execute(&cfg, op, io::stdin().lock(), io::stdout().lock())
}

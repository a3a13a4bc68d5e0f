//! `pki2fa`: command-line shell over `pki2fa-provisioning`.
//!
//! Exit status: 0 on success, 1 on error, 2 when `verify` rejects a code.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod logging;

use std::process::ExitCode;

use clap::Parser;
use pki2fa_crypto_core::{disable_core_dumps, unix_now};

use crate::cli::Cli;
use crate::commands::Outcome;

/// Parse arguments, run one subcommand, and map the result to an exit code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init_logging(cli.log_directive()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: {e}");
            None
        }
    };

    // Private keys and seeds pass through this process.
    if let Err(e) = disable_core_dumps() {
        tracing::warn!(error = %e, "could not disable core dumps");
    }

    let settings = cli.settings();
    let stdout = std::io::stdout();
    match commands::execute(&cli.command, &settings, unix_now(), &mut stdout.lock()) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

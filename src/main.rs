//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! snap-confine - validate untrusted input before confining a snap

use std::process::ExitCode;

use clap::Parser;
use snap_confine::cli::{self, Cli};
use snap_confine::config::LogConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(LogConfig::from_env().env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Validation failures end the process here and nowhere else.
    match cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

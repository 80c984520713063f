//! # MARCHGRID
//!
//! Generates a noise occupancy grid and prints it as marching-squares tiles.
//!
//! ```bash
//! # Default 1280x720 screen, random seed
//! marchgrid
//!
//! # Reproducible, cleaned, from a config file
//! marchgrid --config grid.toml --seed 42 --cleanup
//!
//! # Raw tile indices for another renderer
//! marchgrid --output indices
//! ```
//!
//! Exit status: 0 on success, 1 on I/O failure, 2 on invalid configuration.

mod cli;
mod sinks;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(cli::exit_code(&e))
        }
    }
}

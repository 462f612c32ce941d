//! Postman collection generator - command-line entry point.
//!
//! Scans one or more directory trees for JAX-RS service interfaces inside
//! `*-client` projects and writes one Postman collection per service, one per
//! project and one aggregate collection.
//!
//! # Usage
//!
//! ```bash
//! postman-from-source [OPTIONS] <ROOT_DIR>...
//! ```
//!
//! # Examples
//!
//! ```bash
//! postman-from-source ~/src/platform -o postman_collections
//! postman-from-source ./billing-client ./orders-client --base-url https://api.local -v
//! ```
//!
//! The process exits with a non-zero status when a root cannot be scanned or
//! any document could not be written.

use anyhow::Result;
use clap::Parser;
use log::info;
use postman_from_source::cli;

fn main() -> Result<()> {
    // Parse first so the verbose flag can drive logger initialisation
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Postman collection generator starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Postman collection generation completed successfully");

    Ok(())
}

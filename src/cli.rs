use crate::config::GeneratorConfig;
use crate::orchestrator::{self, RunSummary};
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// Postman collection generator - builds collections from JAX-RS service interfaces
#[derive(Parser, Debug)]
#[command(name = "postman-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Root directories to search for service and model files
    #[arg(value_name = "ROOT_DIR", required = true, num_args = 1..)]
    pub root_dirs: Vec<PathBuf>,

    /// Output directory for Postman collections
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "postman_collections")]
    pub output_dir: PathBuf,

    /// Default value of the `baseUrl` collection variable
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Name of the aggregate collection
    #[arg(long = "collection-name", value_name = "NAME")]
    pub collection_name: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Generator configuration with the command-line overrides applied.
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(ref name) = self.collection_name {
            config = config.with_aggregate_name(name.clone());
        }
        config
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    for root in &args.root_dirs {
        if !root.exists() {
            anyhow::bail!("Root directory does not exist: {}", root.display());
        }
        if !root.is_dir() {
            anyhow::bail!("Root path is not a directory: {}", root.display());
        }
        info!("Root directory: {}", root.display());
    }

    if args.output_dir.exists() && !args.output_dir.is_dir() {
        anyhow::bail!(
            "Output path is not a directory: {}",
            args.output_dir.display()
        );
    }
    info!("Output directory: {}", args.output_dir.display());

    Ok(args)
}

/// Run the main workflow
///
/// # Errors
///
/// Fails when discovery fails or when any document could not be written.
pub fn run(args: CliArgs) -> Result<RunSummary> {
    let config = args.generator_config();
    info!("Base URL: {}", config.base_url);

    let summary = orchestrator::run(&args.root_dirs, &args.output_dir, config)?;

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Model files scanned: {}", summary.model_files);
    info!("  - Models parsed: {}", summary.models_registered);
    info!("  - Service files found: {}", summary.service_files);
    info!("  - Services assembled: {}", summary.services_assembled);
    info!("  - Projects: {}", summary.projects);
    info!("  - Files skipped: {}", summary.skipped_files.len());
    info!("  - Documents written: {}", summary.documents_written.len());
    if !summary.renamed_documents.is_empty() {
        info!("  - Renamed on collision: {}", summary.renamed_documents.len());
    }

    if summary.has_write_failures() {
        anyhow::bail!(
            "Failed to write {} document(s), first: {}",
            summary.write_failures.len(),
            summary.write_failures[0].display()
        );
    }

    Ok(summary)
}

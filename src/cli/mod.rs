pub mod commands;
pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::samples::sample_catalog;
use crate::services::HubCatalog;

#[derive(Parser)]
#[command(name = "hubdocs")]
#[command(about = "Hub Docs CLI - Generate and inspect real-time hub documentation")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "HUBDOCS_CATALOG", help = "Hub catalog file (YAML or JSON); built-in samples when omitted")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the documentation JSON for every discovered hub")]
    Generate(commands::generate::GenerateArgs),

    #[command(about = "List discovered hubs and their routes")]
    Hubs,

    #[command(about = "Show the descriptor of a single hub")]
    Inspect(commands::inspect::InspectArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Catalog from `path`, or the built-in sample catalog.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<HubCatalog> {
    match path {
        Some(path) => HubCatalog::from_path(path)
            .with_context(|| format!("Failed to load hub catalog {}", path.display())),
        None => Ok(sample_catalog()),
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::handle(args, &catalog),
        Commands::Hubs => commands::hubs::handle(&catalog, output_format),
        Commands::Inspect(args) => commands::inspect::handle(args, &catalog, output_format),
    }
}

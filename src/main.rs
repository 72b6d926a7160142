//! Padrón pipeline: turns a directory of per-page registry text dumps
//! into per-page JSON artifacts and one consolidated dataset sorted by
//! DNI.

mod consolidate;
mod model;
mod parser;
mod pipeline;
mod source;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use consolidate::MergeStrategy;
use source::TextDirSource;
use store::ArtifactStore;

#[derive(Parser)]
#[command(name = "padron", about = "Voter registry extraction and consolidation pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract voter records from page text files into per-page artifacts
    Extract {
        /// Directory of page_<n>.txt source files
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory for page_<n>.json artifacts
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Merge page artifacts into one dataset sorted by DNI
    Consolidate {
        /// Directory holding page_<n>.json artifacts
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Keep only the first record per DNI instead of every entry
        #[arg(long)]
        unique: bool,
    },
    /// Extract + consolidate in one pipeline
    Run {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        unique: bool,
    },
}

#[derive(Debug, Deserialize)]
struct Settings {
    input_dir: PathBuf,
    data_dir: PathBuf,
}

fn load_settings() -> Result<Settings> {
    config::Config::builder()
        .set_default("input_dir", "split_pages")?
        .set_default("data_dir", "data")?
        .add_source(config::Environment::with_prefix("PADRON"))
        .build()
        .context("failed to load settings")?
        .try_deserialize()
        .context("invalid settings")
}

fn merge_strategy(unique: bool) -> MergeStrategy {
    if unique {
        MergeStrategy::UniqueByDni
    } else {
        MergeStrategy::KeepDuplicates
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings()?;

    match cli.command {
        Commands::Extract { input, data } => {
            let source = TextDirSource::new(input.unwrap_or(settings.input_dir));
            let store = ArtifactStore::new(data.unwrap_or(settings.data_dir));
            println!("Extracting pages from {:?}...", source.dir());
            let summary = pipeline::extract_pages(&source, &store)?;
            summary.print();
        }
        Commands::Consolidate { data, unique } => {
            let store = ArtifactStore::new(data.unwrap_or(settings.data_dir));
            let summary = pipeline::consolidate_artifacts(&store, merge_strategy(unique))?;
            summary.print();
            println!("Combined data saved to {:?}", store.consolidated_path());
        }
        Commands::Run {
            input,
            data,
            unique,
        } => {
            let source = TextDirSource::new(input.unwrap_or(settings.input_dir));
            let store = ArtifactStore::new(data.unwrap_or(settings.data_dir));
            println!("Extracting pages from {:?}...", source.dir());
            let extracted = pipeline::extract_pages(&source, &store)?;
            extracted.print();

            let merged = pipeline::consolidate_artifacts(&store, merge_strategy(unique))?;
            merged.print();
            println!("Combined data saved to {:?}", store.consolidated_path());
        }
    }

    Ok(())
}

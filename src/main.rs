//! Hardening Dataset - Main Entry Point
//!
//! Builds a labeled, feature-augmented, stratified dataset of simulated
//! Linux hardening configurations. Each subcommand runs one stage against
//! the artifacts under the working root; `run` executes all of them.

mod constants;
mod error;
mod logic;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use constants::{get_dataset_root, APP_NAME, APP_VERSION};
use logic::config::PipelineConfig;
use logic::dataset::DatasetLayout;
use logic::pipeline::{run_all, run_labeled, Stage, StageFailure};

/// Hardening compliance dataset pipeline
#[derive(Parser)]
#[command(name = "hardening-dataset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Working root; the dataset/ tree lives beneath it [env: DATASET_ROOT]
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// JSON file overriding seeds, ratios and the simulation window
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the CIS rule catalog
    ExtractRules,

    /// Generate SSH and file permission configurations
    Generate {
        /// Seed for timestamp synthesis
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate configurations into the labeled dataset
    Label,

    /// Add feature columns to the labeled dataset
    Features,

    /// Stratified train / validation / test split
    Split {
        /// Seed for stratified sampling
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        train: Option<f64>,

        #[arg(long)]
        validation: Option<f64>,

        #[arg(long)]
        test: Option<f64>,
    },

    /// Run every stage in order
    Run,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let layout = DatasetLayout::new(cli.root.clone().unwrap_or_else(get_dataset_root));
    log::debug!("Working root: {}", layout.root().display());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::ExtractRules => run_labeled(Stage::ExtractRules, &layout, &config),
        Commands::Generate { .. } => run_labeled(Stage::Generate, &layout, &config),
        Commands::Label => run_labeled(Stage::Label, &layout, &config),
        Commands::Features => run_labeled(Stage::Features, &layout, &config),
        Commands::Split { .. } => run_labeled(Stage::Split, &layout, &config),
        Commands::Run => run_all(&layout, &config).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => report(&failure),
    }
}

/// Defaults, then the config file, then CLI flags
fn load_config(cli: &Cli) -> error::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    match &cli.command {
        Commands::Generate { seed } => {
            if let Some(seed) = seed {
                config.generation_seed = *seed;
            }
        }
        Commands::Split {
            seed,
            train,
            validation,
            test,
        } => {
            if let Some(seed) = seed {
                config.split_seed = *seed;
            }
            if let Some(train) = train {
                config.ratios.train = *train;
            }
            if let Some(validation) = validation {
                config.ratios.validation = *validation;
            }
            if let Some(test) = test {
                config.ratios.test = *test;
            }
        }
        _ => {}
    }

    config.validate()?;
    Ok(config)
}

fn report(failure: &StageFailure) -> ExitCode {
    log::error!("[{}] {}", failure.stage.description(), failure.source);
    eprintln!("error: {}", failure);
    ExitCode::FAILURE
}

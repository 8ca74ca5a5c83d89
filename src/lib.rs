pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::dataset::Dataset;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Commands supported by the application, decoupled from the clap surface so
/// integration tests can drive the app without argument parsing.
pub enum AppCommand {
    Price {
        model: String,
        date: String,
    },
    Models {
        date: String,
    },
    History {
        model: String,
        csv: Option<PathBuf>,
    },
    Compare {
        model: String,
        start: String,
        btc_start: f64,
        btc_end: f64,
        price: Option<f64>,
        csv: Option<PathBuf>,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Rig price tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let dataset = Dataset::with_overrides(&config.overrides)?;

    match command {
        AppCommand::Price { model, date } => {
            cli::price::run(&dataset, &config.currency, &model, &date)
        }
        AppCommand::Models { date } => cli::models::run(&dataset, &config.currency, &date),
        AppCommand::History { model, csv } => {
            cli::history::run(&dataset, &config.currency, &model, csv.as_deref())
        }
        AppCommand::Compare {
            model,
            start,
            btc_start,
            btc_end,
            price,
            csv,
        } => {
            let args = cli::compare::CompareArgs {
                model,
                start,
                btc_start,
                btc_end,
                price,
                csv,
            };
            cli::compare::run(&dataset, &config, &args)
        }
    }
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use rigprice::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for rigprice::AppCommand {
    fn from(cmd: Commands) -> rigprice::AppCommand {
        match cmd {
            Commands::Price { model, date } => rigprice::AppCommand::Price { model, date },
            Commands::Models { date } => rigprice::AppCommand::Models { date },
            Commands::History { model, csv } => rigprice::AppCommand::History { model, csv },
            Commands::Compare {
                model,
                start,
                btc_start,
                btc_end,
                price,
                csv,
            } => rigprice::AppCommand::Compare {
                model,
                start,
                btc_start,
                btc_end,
                price,
                csv,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate the resale price of a model on a date
    Price {
        /// Model identifier, e.g. s9_135
        model: String,
        /// Date as YYYY-MM or YYYY-MM-DD
        date: String,
    },
    /// List models on the market at a date
    Models {
        /// Date as YYYY-MM or YYYY-MM-DD
        date: String,
    },
    /// Display the monthly price history of a model
    History {
        /// Model identifier, e.g. s9_135
        model: String,
        /// Write the history as CSV to this path instead of printing a table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compare physical mining against buying and holding BTC
    Compare {
        /// Model identifier, e.g. s19pro
        model: String,
        /// Start date as YYYY-MM or YYYY-MM-DD
        start: String,
        /// BTC price at the start of the period
        #[arg(long)]
        btc_start: f64,
        /// BTC price at the end of the period
        #[arg(long)]
        btc_end: f64,
        /// Hardware price override; resolved from history when omitted
        #[arg(long)]
        price: Option<f64>,
        /// Write the comparison as CSV to this path instead of printing tables
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => rigprice::cli::setup::setup(),
        Some(cmd) => rigprice::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

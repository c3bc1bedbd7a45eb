mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use commands::{config, list, plan, prepare, show};

/// Inspect engine providers and plan model launches
#[derive(Parser, Debug)]
#[command(name = "engine", version, about)]
struct Cli {
    /// Config file (default: ~/.engine-service/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List(list::ListArgs),
    Show(show::ShowArgs),
    Plan(plan::PlanArgs),
    Prepare(prepare::PrepareArgs),
    /// Print the config path and effective configuration
    Config,
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::List(args) => list::execute(config_path, args),
        Command::Show(args) => show::execute(config_path, args),
        Command::Plan(args) => plan::execute(config_path, args),
        Command::Prepare(args) => prepare::execute(args),
        Command::Config => config::execute(config_path),
    }
}

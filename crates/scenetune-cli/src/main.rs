mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenetune", about = "Scene-adaptive encoder tuning replay tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded frame feedback traces through tuning sessions
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default tuning config as TOML
    Config(commands::config::ConfigArgs),
    /// Print or save the built-in profile table as TOML
    Profiles(commands::profiles::ProfilesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Profiles(args) => commands::profiles::run(args),
    }
}

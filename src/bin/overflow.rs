//! Overflow CLI - headless matches and AI analysis for the chain-reaction game

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "overflow")]
#[command(version, about = "Chain-reaction gem game with an alpha-beta AI", long_about = None)]
struct Cli {
    /// Log search and match details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two agents
    Play(Box<overflow::cli::commands::play::PlayArgs>),

    /// Resolve a grid's chain reaction and print every step
    Resolve(overflow::cli::commands::resolve::ResolveArgs),

    /// Evaluate a position and show the AI's search
    Analyze(overflow::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    overflow::cli::init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => overflow::cli::commands::play::execute(*args),
        Commands::Resolve(args) => overflow::cli::commands::resolve::execute(args),
        Commands::Analyze(args) => overflow::cli::commands::analyze::execute(args),
    }
}

//! Play command - run games between two agents

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    app::{AgentConfig, App, Difficulty},
    cli::output::{format_number, format_share, print_grid, print_kv, print_section},
    game::{GameOutcome, Grid, Player},
    pipeline::{JsonlObserver, MatchConfig, MetricsObserver, ProgressObserver},
    ports::{Agent, Observer, observer::MoveEvent},
};

/// Agent controlling one side
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentChoice {
    Minimax,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play games between two agents")]
pub struct PlayArgs {
    /// Agent for player one
    #[arg(long, value_enum, default_value_t = AgentChoice::Minimax)]
    pub one: AgentChoice,

    /// Agent for player two
    #[arg(long, value_enum, default_value_t = AgentChoice::Random)]
    pub two: AgentChoice,

    /// Search difficulty for player one (easy, normal, hard, or a depth)
    #[arg(long, default_value = "hard")]
    pub one_difficulty: Difficulty,

    /// Search difficulty for player two (easy, normal, hard, or a depth)
    #[arg(long, default_value = "hard")]
    pub two_difficulty: Difficulty,

    /// Board rows
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 6)]
    pub cols: usize,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Side that opens every game (1 or 2)
    #[arg(long, default_value = "1")]
    pub first: Player,

    /// Moves after which a game is abandoned as unfinished
    #[arg(long, default_value_t = 500)]
    pub turn_limit: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the board after every move
    #[arg(long)]
    pub show: bool,

    /// Write every move as JSON lines to this file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Save the series result as JSON to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn agent_config(choice: AgentChoice, difficulty: Difficulty, player: Player) -> AgentConfig {
    let config = match choice {
        AgentChoice::Minimax => AgentConfig::minimax(difficulty),
        AgentChoice::Random => AgentConfig::random(),
    };
    let name = format!("{} [{}]", config.display_name(), player);
    config.with_name(name)
}

/// Prints each board as the game unfolds
struct BoardPrinter;

impl Observer for BoardPrinter {
    fn on_game_start(&mut self, game_num: usize, grid: &Grid) -> crate::Result<()> {
        print_section(&format!("Game {}", game_num + 1));
        print_grid(grid);
        Ok(())
    }

    fn on_move(&mut self, event: &MoveEvent<'_>) -> crate::Result<()> {
        println!(
            "\nTurn {}: {} plays {} ({} cascade steps)",
            event.turn + 1,
            event.player,
            event.mv,
            event.cascade_steps()
        );
        print_grid(event.grid);
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> crate::Result<()> {
        match outcome {
            GameOutcome::Win(player) => println!("\n{player} wins"),
            GameOutcome::Forfeit(player) => println!("\n{player} wins by forfeit"),
            GameOutcome::Unfinished => println!("\nTurn limit reached"),
        }
        Ok(())
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = match args.seed {
        Some(seed) => App::new().with_default_seed(seed),
        None => App::new(),
    };

    let mut one = app.create_agent(&agent_config(args.one, args.one_difficulty, Player::One))?;
    let mut two = app.create_agent(&agent_config(args.two, args.two_difficulty, Player::Two))?;

    let config = MatchConfig {
        rows: args.rows,
        cols: args.cols,
        first_player: args.first,
        turn_limit: args.turn_limit,
        seed: args.seed,
    };

    print_section("Match Configuration");
    print_kv("Player one", one.name());
    print_kv("Player two", two.name());
    print_kv("Board", &format!("{}x{}", config.rows, config.cols));
    print_kv("First player", &config.first_player.to_string());
    print_kv("Games", &format_number(args.games));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut metrics = MetricsObserver::new();
    let result = {
        let mut runner = app
            .create_runner(config)?
            .with_observer(Box::new(&mut metrics));
        if args.show {
            runner = runner.with_observer(Box::new(BoardPrinter));
        } else if args.games > 1 {
            runner = runner.with_observer(Box::new(ProgressObserver::new()));
        }
        if let Some(path) = &args.export {
            runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
        }
        runner.run_series(args.games, one.as_mut(), two.as_mut())?
    };

    let summary = metrics.summary();
    print_section("Results");
    print_kv("Total games", &format_number(result.total_games));
    print_kv(
        "Player one wins",
        &format_share(result.player_one_wins, result.player_one_win_rate),
    );
    print_kv(
        "Player two wins",
        &format_share(result.player_two_wins, result.player_two_win_rate),
    );
    print_kv(
        "Unfinished",
        &format_share(result.unfinished, result.unfinished_rate),
    );
    if result.forfeits > 0 {
        print_kv("Forfeits", &format_number(result.forfeits));
    }
    print_kv("Mean game length", &format!("{:.1} moves", summary.avg_game_length));
    print_kv("Cascade steps", &format_number(summary.total_cascade_steps));
    print_kv("Longest cascade", &format_number(summary.longest_cascade));

    if let Some(path) = &args.export {
        println!("\n✓ Moves exported to: {}", path.display());
    }
    if let Some(path) = &args.summary {
        result.save(path)?;
        println!("✓ Summary saved to: {}", path.display());
    }

    Ok(())
}

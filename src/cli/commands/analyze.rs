//! Analyze command - explain the evaluation and search for a position

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    ai::{ScoreBound, SearchMode, SearchReport, analyze, score_breakdown},
    cli::output::{create_spinner, format_number, print_grid, print_kv, print_section, print_subsection},
    game::{Grid, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Analyze a position: evaluation and search")]
pub struct AnalyzeArgs {
    /// Grid with rows separated by '/', e.g. "1 0 / 0 -1"
    #[arg(allow_hyphen_values = true)]
    pub grid: String,

    /// Player to move (1 or 2)
    #[arg(long, short = 'p', default_value = "1")]
    pub player: Player,

    /// Search depth in plies, root included
    #[arg(long, short = 'd', default_value_t = 4)]
    pub depth: usize,

    /// Also run the exhaustive search and compare decisions
    #[arg(long)]
    pub compare: bool,

    /// Export search reports as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let grid: Grid = args.grid.parse()?;

    print_section("Position");
    print_grid(&grid);

    print_section("Evaluation");
    for player in [Player::One, Player::Two] {
        let breakdown = score_breakdown(&grid, player);
        print_subsection(&format!("Perspective of {player}"));
        print_kv(
            "Cells",
            &format!("{} vs {}", breakdown.player_cells, breakdown.opponent_cells),
        );
        print_kv(
            "Points",
            &format!(
                "{:.2} vs {:.2}",
                breakdown.player_points, breakdown.opponent_points
            ),
        );
        print_kv("Score", &format!("{:.2}", breakdown.score));
    }

    let mut reports = vec![run_search(&grid, &args, SearchMode::AlphaBeta)?];
    print_report(&reports[0]);

    if args.compare {
        let exhaustive = run_search(&grid, &args, SearchMode::Exhaustive)?;
        print_report(&exhaustive);

        print_section("Comparison");
        let same_move = exhaustive.best_move == reports[0].best_move;
        print_kv("Same move", if same_move { "yes" } else { "no" });
        print_kv(
            "Same value",
            if exhaustive.value == reports[0].value {
                "yes"
            } else {
                "no"
            },
        );
        print_kv(
            "Leaves saved",
            &format_number(
                exhaustive
                    .stats
                    .leaves_evaluated
                    .saturating_sub(reports[0].stats.leaves_evaluated),
            ),
        );
        reports.push(exhaustive);
    }

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &reports)?;
        println!("\n✓ Reports exported to: {}", path.display());
    }

    Ok(())
}

fn run_search(grid: &Grid, args: &AnalyzeArgs, mode: SearchMode) -> Result<SearchReport> {
    let spinner = create_spinner(&format!("Searching {} plies ({mode:?})...", args.depth))?;
    let report = analyze(grid, args.player, args.depth, mode);
    spinner.finish_and_clear();
    Ok(report?)
}

fn print_report(report: &SearchReport) {
    let title = match report.mode {
        SearchMode::AlphaBeta => "Search (alpha-beta)",
        SearchMode::Exhaustive => "Search (exhaustive)",
    };
    print_section(title);
    print_kv("Player", &report.player.to_string());
    print_kv("Depth", &report.depth.to_string());
    print_kv("Best move", &report.best_move.to_string());
    print_kv("Value", &format!("{:.2}", report.value));
    print_kv("Tree nodes", &format_number(report.tree_nodes));
    print_kv("Nodes visited", &format_number(report.stats.nodes_visited));
    print_kv("Leaves evaluated", &format_number(report.stats.leaves_evaluated));
    print_kv("Cutoffs", &format_number(report.stats.cutoffs));

    print_subsection("Candidates");
    for candidate in &report.candidates {
        let marker = if candidate.mv == report.best_move {
            "*"
        } else {
            " "
        };
        let mv = candidate.mv.to_string();
        let score = match candidate.bound {
            ScoreBound::Exact => format!("{:.2}", candidate.score),
            ScoreBound::Upper => format!("<= {:.2}", candidate.score),
            ScoreBound::Lower => format!(">= {:.2}", candidate.score),
        };
        println!("  {marker} {mv:<10} {score:>12}");
    }
    if report.candidates.iter().any(|c| !c.is_exact()) {
        println!("  (bounded scores were refuted early by the pruning)");
    }
}

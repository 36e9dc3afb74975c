//! Heuristic board evaluation
//!
//! Scores are always computed from one fixed perspective. The search passes
//! the root player here for every leaf, so values from any depth compare
//! directly in the root's minimax.

use serde::{Deserialize, Serialize};

use crate::game::{Grid, Player};

/// Weight of gems next to opposing gems
const CAPTURE_WEIGHT: f64 = 0.5;
/// Reward per allied cell in the 3x3 block
const ALLY_WEIGHT: f64 = 1.0;
/// Reward per empty cell in the 3x3 block
const EMPTY_WEIGHT: f64 = 0.5;
/// Terminal score multiplier per board cell
const WIN_SCORE_PER_CELL: f64 = 20.0;

/// The four heuristic terms making up one cell's contribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CellScore {
    /// 5 in a corner, 3 on an edge, 1 inside
    pub position: f64,
    /// How close the cell is to exploding, scaled by its position weight
    pub overflow: f64,
    /// Opposing gems in the 3x3 block
    pub capture: f64,
    /// Allied and empty cells in the 3x3 block
    pub strategic: f64,
}

impl CellScore {
    pub fn total(&self) -> f64 {
        self.position + self.overflow + self.capture + self.strategic
    }
}

/// Summary of an evaluation, used for reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub perspective: Player,
    pub player_cells: usize,
    pub opponent_cells: usize,
    pub player_points: f64,
    pub opponent_points: f64,
    /// Final evaluation, including the terminal shortcut
    pub score: f64,
}

/// Score awarded for a won position: `rows * cols * 20`
pub fn win_score(grid: &Grid) -> f64 {
    (grid.rows() * grid.cols()) as f64 * WIN_SCORE_PER_CELL
}

/// Positional value of a cell
pub fn position_weight(grid: &Grid, row: usize, col: usize) -> f64 {
    let on_row_edge = row == 0 || row + 1 == grid.rows();
    let on_col_edge = col == 0 || col + 1 == grid.cols();
    match (on_row_edge, on_col_edge) {
        (true, true) => 5.0,
        (true, false) | (false, true) => 3.0,
        (false, false) => 1.0,
    }
}

/// Heuristic terms for the cell at (row, col) seen from `perspective`.
///
/// Capture and strategic terms classify the 3x3 block (centre included)
/// relative to `perspective`, whichever side owns the scored cell.
pub fn cell_score(grid: &Grid, perspective: Player, row: usize, col: usize) -> CellScore {
    let position = position_weight(grid, row, col);
    let gems = f64::from(grid.get(row, col).unsigned_abs());
    let threshold = grid.neighbor_count(row, col).max(1) as f64;
    let overflow = gems / threshold * position;

    let mut enemy_gems = 0.0;
    let mut strategic = 0.0;
    for value in grid.neighborhood(row, col) {
        if value == 0 {
            strategic += EMPTY_WEIGHT;
        } else if perspective.owns(value) {
            strategic += ALLY_WEIGHT;
        } else {
            enemy_gems += f64::from(value.unsigned_abs());
        }
    }

    CellScore {
        position,
        overflow,
        capture: enemy_gems * CAPTURE_WEIGHT,
        strategic,
    }
}

/// Evaluate `grid` for `player`, keeping the intermediate sums
pub fn score_breakdown(grid: &Grid, player: Player) -> ScoreBreakdown {
    let mut player_points = 0.0;
    let mut opponent_points = 0.0;
    let mut player_cells = 0;
    let mut opponent_cells = 0;

    for (row, col, value) in grid.iter() {
        if value == 0 {
            continue;
        }
        let points = cell_score(grid, player, row, col).total();
        if player.owns(value) {
            player_points += points;
            player_cells += 1;
        } else {
            opponent_points += points;
            opponent_cells += 1;
        }
    }

    let win = win_score(grid);
    let score = if player_cells == 0 {
        -win
    } else if opponent_cells == 0 {
        win
    } else {
        player_points - opponent_points
    };

    ScoreBreakdown {
        perspective: player,
        player_cells,
        opponent_cells,
        player_points,
        opponent_points,
        score,
    }
}

/// Evaluate `grid` for `player`; higher is better for `player`.
///
/// Returns `-win_score` when `player` has no cells and `+win_score` when the
/// opponent has none.
pub fn evaluate(grid: &Grid, player: Player) -> f64 {
    score_breakdown(grid, player).score
}

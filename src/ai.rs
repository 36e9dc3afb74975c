//! Decision engine: board evaluation and fixed-depth game tree search

pub mod evaluation;
pub mod game_tree;

pub use evaluation::{CellScore, ScoreBreakdown, cell_score, evaluate, score_breakdown, win_score};
pub use game_tree::{
    Candidate, GameTree, NodeId, ScoreBound, SearchMode, SearchNode, SearchReport, SearchStats,
    analyze, choose_move,
};

//! Board evaluator properties

mod common;

use common::{grid, random_grid, random_session};
use overflow::{
    Grid, Player,
    ai::{cell_score, evaluate, score_breakdown, win_score},
};
use rand::{SeedableRng, rngs::StdRng};

/// Keep only the cells owned by `keep`, emptying the rest
fn only(board: &Grid, keep: Player) -> Grid {
    let mut result = board.clone();
    for (row, col, value) in board.iter() {
        if !keep.owns(value) {
            result.set(row, col, 0);
        }
    }
    result
}

#[test]
fn test_win_and_loss_scores() {
    let mut rng = StdRng::seed_from_u64(3);
    for (rows, cols) in [(2, 2), (3, 4), (5, 6)] {
        for _ in 0..50 {
            let board = random_grid(&mut rng, rows, cols, 3);
            let win = (rows * cols * 20) as f64;

            for player in [Player::One, Player::Two] {
                let mine = only(&board, player);
                if mine.count_cells(player) == 0 {
                    continue;
                }
                assert_eq!(evaluate(&mine, player), win);
                assert_eq!(evaluate(&mine, player.opponent()), -win);
            }
        }
    }
}

#[test]
fn test_empty_board_is_a_loss_for_both() {
    let board = Grid::new(5, 6);
    assert_eq!(win_score(&board), 600.0);
    assert_eq!(evaluate(&board, Player::One), -600.0);
    assert_eq!(evaluate(&board, Player::Two), -600.0);
}

#[test]
fn test_evaluation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let session = random_session(&mut rng, 5, 6, 20);
        let board = session.grid();
        for player in [Player::One, Player::Two] {
            assert_eq!(evaluate(board, player), evaluate(board, player));
            assert_eq!(score_breakdown(board, player), score_breakdown(board, player));
        }
    }
}

#[test]
fn test_contested_score_is_point_difference() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..100 {
        let session = random_session(&mut rng, 4, 4, 12);
        let board = session.grid();
        if board.sole_owner().is_some() {
            continue;
        }
        let breakdown = score_breakdown(board, Player::One);
        let expected: f64 = board
            .iter()
            .filter(|&(_, _, value)| value != 0)
            .map(|(row, col, value)| {
                let points = cell_score(board, Player::One, row, col).total();
                if value > 0 { points } else { -points }
            })
            .sum();
        assert!((breakdown.score - expected).abs() < 1e-9);
    }
}

#[test]
fn test_cell_score_terms_by_position() {
    // 3x3 with an allied interior cell surrounded by one enemy and empties
    let board = grid("0 -2 0 / 0 2 0 / 0 0 0");
    let score = cell_score(&board, Player::One, 1, 1);

    assert_eq!(score.position, 1.0);
    assert_eq!(score.overflow, 0.5);
    assert_eq!(score.capture, 1.0);
    // itself plus seven empty cells
    assert_eq!(score.strategic, 1.0 + 7.0 * 0.5);
}

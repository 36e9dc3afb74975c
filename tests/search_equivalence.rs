//! Alpha-beta must choose what plain minimax chooses, with less work

mod common;

use common::{grid, random_session};
use overflow::{
    Error, Grid, Move, Player,
    ai::{GameTree, ScoreBound, SearchMode, analyze, choose_move, evaluate},
};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn test_pruning_never_changes_the_decision() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut positions = 0;
    let mut total_pruned = 0;
    let mut total_full = 0;

    for (rows, cols, depth) in [(3, 3, 4), (3, 4, 3), (4, 4, 3), (2, 3, 5)] {
        for moves in [0, 2, 5, 9] {
            let session = random_session(&mut rng, rows, cols, moves);
            if session.is_over() {
                continue;
            }
            let board = session.grid();
            let player = session.to_move();

            let pruned = analyze(board, player, depth, SearchMode::AlphaBeta).unwrap();
            let full = analyze(board, player, depth, SearchMode::Exhaustive).unwrap();

            assert_eq!(pruned.best_move, full.best_move, "board:\n{board}");
            assert_eq!(pruned.value, full.value);
            assert_eq!(choose_move(board, player, depth).unwrap(), full.best_move);
            assert!(pruned.stats.leaves_evaluated <= full.stats.leaves_evaluated);

            // Every pruned candidate is either exact or a true bound.
            for (cut, exact) in pruned.candidates.iter().zip(&full.candidates) {
                assert_eq!(cut.mv, exact.mv);
                match cut.bound {
                    ScoreBound::Exact => assert_eq!(cut.score, exact.score),
                    ScoreBound::Upper => assert!(exact.score <= cut.score),
                    ScoreBound::Lower => assert!(exact.score >= cut.score),
                }
            }

            positions += 1;
            total_pruned += pruned.stats.leaves_evaluated;
            total_full += full.stats.leaves_evaluated;
        }
    }

    assert!(positions > 0);
    assert!(total_pruned < total_full);
}

#[test]
fn test_exhaustive_search_matches_brute_force() {
    let board = grid("1 0 0 / 0 -1 0 / 0 0 0");
    let full = analyze(&board, Player::One, 3, SearchMode::Exhaustive).unwrap();

    // One move for player one, then the best reply for player two
    let mut best: Option<(Move, f64)> = None;
    for mv in board.legal_moves(Player::One) {
        let mut after = board.clone();
        after.place(mv, Player::One).unwrap();
        overflow::resolve(&mut after);

        let replies = after.legal_moves(Player::Two);
        let worst = replies
            .into_iter()
            .map(|reply| {
                let mut next = after.clone();
                next.place(reply, Player::Two).unwrap();
                overflow::resolve(&mut next);
                evaluate(&next, Player::One)
            })
            .fold(f64::INFINITY, f64::min);
        let value = if worst.is_finite() {
            worst
        } else {
            evaluate(&after, Player::One)
        };

        if best.is_none_or(|(_, score)| value > score) {
            best = Some((mv, value));
        }
    }

    let (mv, value) = best.unwrap();
    assert_eq!(full.best_move, mv);
    assert_eq!(full.value, value);
}

#[test]
fn test_tree_children_follow_row_major_order() {
    let board = Grid::opening(3, 3);
    let tree = GameTree::build(&board, Player::One, 2).unwrap();
    let root = tree.node(tree.root());

    let moves: Vec<Move> = root
        .children
        .iter()
        .map(|&child| tree.node(child).mv.unwrap())
        .collect();
    assert_eq!(moves, board.legal_moves(Player::One));
}

#[test]
fn test_degenerate_depths() {
    let board = Grid::opening(5, 6);
    assert!(matches!(
        choose_move(&board, Player::One, 0),
        Err(Error::InvalidDepth { depth: 0 })
    ));
    assert!(matches!(
        choose_move(&board, Player::One, 1),
        Err(Error::NoMoveAvailable {
            player: Player::One
        })
    ));
}

#[test]
fn test_search_leaves_the_caller_grid_alone() {
    let mut rng = StdRng::seed_from_u64(8);
    let session = random_session(&mut rng, 4, 4, 6);
    let board = session.grid().clone();
    for depth in 2..=4 {
        choose_move(&board, session.to_move(), depth).unwrap();
        assert_eq!(&board, session.grid());
    }
}

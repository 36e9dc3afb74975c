//! Common test utilities for the overflow test suite.
//!
//! Board generators driven by a seeded `StdRng` so every randomized check is
//! reproducible.

#![allow(dead_code)]

use overflow::{Grid, Session};
use rand::{Rng, rngs::StdRng};

/// Parse grid text such as `"1 0 / 0 -1"`.
pub fn grid(text: &str) -> Grid {
    text.parse().expect("valid grid text")
}

/// Fill a grid with arbitrary signed gem counts in `-max..=max`.
///
/// The result need not be reachable in play; the simulator must still handle
/// it.
pub fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, max: i32) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            grid.set(row, col, rng.random_range(-max..=max));
        }
    }
    grid
}

/// Play up to `moves` uniformly random legal moves from the opening position.
///
/// Stops early once the game has a winner.
pub fn random_session(rng: &mut StdRng, rows: usize, cols: usize, moves: usize) -> Session {
    let mut session = Session::new(rows, cols);
    for _ in 0..moves {
        if session.is_over() {
            break;
        }
        let legal = session.grid().legal_moves(session.to_move());
        let mv = legal[rng.random_range(0..legal.len())];
        session.play(mv).expect("generated move is legal");
    }
    session
}

//! Agent adapters: the minimax AI and a uniform random baseline

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ai::choose_move,
    app::Difficulty,
    game::{Grid, Move, Player},
    ports::Agent,
};

/// Alpha-beta search agent
///
/// The difficulty may be changed between turns; each move builds and drops
/// a fresh tree.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    name: String,
    difficulty: Difficulty,
}

impl MinimaxAgent {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, grid: &Grid, player: Player) -> Result<Move> {
        choose_move(grid, player, self.difficulty.depth())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Random policy agent (uniform over legal moves)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a random agent seeded from the thread RNG
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, grid: &Grid, player: Player) -> Result<Move> {
        let moves = grid.legal_moves(player);
        if moves.is_empty() {
            return Err(Error::NoMoveAvailable { player });
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

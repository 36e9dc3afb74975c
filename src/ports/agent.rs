//! Agent port - abstraction over anything that picks moves

use crate::{
    Result,
    game::{Grid, Move, Player},
};

/// Agent trait - unified interface for move selection
///
/// Implemented by the minimax AI and the random baseline, and by anything a
/// host wants to plug into [`crate::pipeline::MatchRunner`].
///
/// # Examples
///
/// ```
/// use overflow::{
///     Grid, Move, Player,
///     ports::Agent,
/// };
///
/// struct FirstLegal;
///
/// impl Agent for FirstLegal {
///     fn select_move(&mut self, grid: &Grid, player: Player) -> overflow::Result<Move> {
///         grid.legal_moves(player)
///             .first()
///             .copied()
///             .ok_or(overflow::Error::NoMoveAvailable { player })
///     }
///
///     fn name(&self) -> &str {
///         "first-legal"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Select a move for `player` on `grid`.
    ///
    /// The runner checks the returned move; an illegal move forfeits the
    /// game.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent cannot produce any move, e.g.
    /// [`crate::Error::NoMoveAvailable`].
    fn select_move(&mut self, grid: &Grid, player: Player) -> Result<Move>;

    /// Name used in reports and logs
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Pipelines call this when given a deterministic seed. Deterministic
    /// agents keep the default no-op.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn select_move(&mut self, grid: &Grid, player: Player) -> Result<Move> {
        (**self).select_move(grid, player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }
}

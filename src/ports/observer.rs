//! Observer port - abstraction for watching matches
//!
//! Observers collect data while a series of games runs without coupling the
//! match runner to any output format.

use crate::{
    Result,
    game::{GameOutcome, Grid, Move, Player},
};

/// Everything known about one played move
#[derive(Debug, Clone, Copy)]
pub struct MoveEvent<'a> {
    /// Index of the game in the series (0-based)
    pub game_num: usize,
    /// Turn index within the game (0-based)
    pub turn: usize,
    pub player: Player,
    pub mv: Move,
    /// Board after the chain reaction settled
    pub grid: &'a Grid,
    /// One snapshot per cascade step, oldest first
    pub cascade: &'a [Grid],
}

impl MoveEvent<'_> {
    pub fn cascade_steps(&self) -> usize {
        self.cascade.len()
    }
}

/// Observer trait for monitoring matches
///
/// # Event Sequence
///
/// 1. `on_series_start(total_games)` - once
/// 2. For each game:
///    - `on_game_start(game_num, grid)`
///    - `on_move(event)` - for each legal move played
///    - `on_game_end(game_num, outcome)`
/// 3. `on_series_end()` - once
///
/// Every method defaults to a no-op.
pub trait Observer: Send {
    fn on_series_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called with the opening board of a game
    fn on_game_start(&mut self, _game_num: usize, _grid: &Grid) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been played and its chain reaction resolved
    fn on_move(&mut self, _event: &MoveEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once all games finished; flush files and print summaries here.
    fn on_series_end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_series_start(&mut self, total_games: usize) -> Result<()> {
        (**self).on_series_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize, grid: &Grid) -> Result<()> {
        (**self).on_game_start(game_num, grid)
    }

    fn on_move(&mut self, event: &MoveEvent<'_>) -> Result<()> {
        (**self).on_move(event)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        (**self).on_game_end(game_num, outcome)
    }

    fn on_series_end(&mut self) -> Result<()> {
        (**self).on_series_end()
    }
}

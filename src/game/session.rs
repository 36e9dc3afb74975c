//! Live game state: the board, whose turn it is, and undo history

use serde::{Deserialize, Serialize};

use super::{
    grid::{Grid, Move, Player},
    overflow,
    record::Recorder,
};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The opponent of this player has no cells left
    Win(Player),
    /// The other side played an illegal move; this player is awarded the game
    Forfeit(Player),
    /// Turn limit reached without a winner
    Unfinished,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) | GameOutcome::Forfeit(player) => Some(player),
            GameOutcome::Unfinished => None,
        }
    }
}

/// Board state saved before a move so it can be undone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Checkpoint {
    grid: Grid,
    to_move: Player,
}

/// A game in progress
///
/// Every move goes through the same chain-reaction simulator the search uses,
/// so the live board and the AI's hypothetical boards never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    grid: Grid,
    to_move: Player,
    turn: usize,
    history: Vec<Checkpoint>,
}

impl Session {
    /// Start from the opening position with player one to move
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_first_player(rows, cols, Player::One)
    }

    /// Start from the opening position with `first` to move
    pub fn with_first_player(rows: usize, cols: usize, first: Player) -> Self {
        Self::from_grid(Grid::opening(rows, cols), first)
    }

    /// Continue from an arbitrary grid; the turn counter starts at zero.
    pub fn from_grid(grid: Grid, to_move: Player) -> Self {
        Self {
            grid,
            to_move,
            turn: 0,
            history: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Number of moves played so far
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Whether the side to move may place on `mv`
    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.grid.is_legal(mv, self.to_move)
    }

    /// Play a move for the side to move and resolve its chain reaction.
    ///
    /// Returns the number of cascade steps.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once a winner exists, or the
    /// placement error when the move is illegal. The session is unchanged on
    /// error.
    pub fn play(&mut self, mv: Move) -> Result<usize, crate::Error> {
        self.apply(mv, None)
    }

    /// Like [`Session::play`], recording one snapshot per cascade step.
    pub fn play_recorded(
        &mut self,
        mv: Move,
        recorder: &mut dyn Recorder,
    ) -> Result<usize, crate::Error> {
        self.apply(mv, Some(recorder))
    }

    fn apply(&mut self, mv: Move, recorder: Option<&mut dyn Recorder>) -> Result<usize, crate::Error> {
        if self.winner().is_some() {
            return Err(crate::Error::GameOver);
        }

        let before = self.grid.clone();
        self.grid.place(mv, self.to_move)?;
        let steps = match recorder {
            Some(recorder) => overflow::resolve_recorded(&mut self.grid, recorder),
            None => overflow::resolve(&mut self.grid),
        };

        self.history.push(Checkpoint {
            grid: before,
            to_move: self.to_move,
        });
        self.turn += 1;
        self.to_move = self.to_move.opponent();
        Ok(steps)
    }

    /// The winner, if any. No one can win before the first move; afterwards a
    /// player wins once the opponent owns no cells.
    pub fn winner(&self) -> Option<Player> {
        if self.turn == 0 {
            return None;
        }
        self.grid.sole_owner()
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Cells owned by (player one, player two)
    pub fn scores(&self) -> (usize, usize) {
        (
            self.grid.count_cells(Player::One),
            self.grid.count_cells(Player::Two),
        )
    }

    /// Restore the board and side to move from before the last move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NothingToUndo`] when no move has been played.
    pub fn undo(&mut self) -> Result<(), crate::Error> {
        let checkpoint = self.history.pop().ok_or(crate::Error::NothingToUndo)?;
        self.grid = checkpoint.grid;
        self.to_move = checkpoint.to_move;
        self.turn -= 1;
        Ok(())
    }
}

//! Error types for the overflow crate

use thiserror::Error;

use crate::game::Player;

/// Main error type for the overflow crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: ({row}, {col}) is owned by the opponent of {player}")]
    InvalidMove {
        row: usize,
        col: usize,
        player: Player,
    },

    #[error("position ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("malformed grid: {message}")]
    MalformedGrid { message: String },

    #[error("invalid cell value '{token}' in row {row}")]
    InvalidCellValue { token: String, row: usize },

    #[error("search depth must be at least 1, got {depth}")]
    InvalidDepth { depth: usize },

    #[error("difficulty depth must be at least {minimum}, got {depth}")]
    DifficultyTooShallow { depth: usize, minimum: usize },

    #[error("no legal move available for {player}")]
    NoMoveAvailable { player: Player },

    #[error("game already over")]
    GameOver,

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("invalid player '{input}'. Expected one of: {expected}")]
    ParsePlayer { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

//! Overflow: a two-player chain-reaction gem game with an alpha-beta AI
//!
//! This crate provides:
//! - The grid model and the chain-reaction simulator shared by live play and
//!   the search
//! - A heuristic evaluator and a fixed-depth minimax search with alpha-beta
//!   pruning
//! - A headless match pipeline with pluggable agents and observers
//! - The `overflow` command-line front end
//!
//! ```
//! use overflow::{Player, Session, choose_move};
//!
//! let mut session = Session::new(5, 6);
//! let mv = choose_move(session.grid(), Player::One, 2)?;
//! session.play(mv)?;
//! assert_eq!(session.to_move(), Player::Two);
//! # Ok::<(), overflow::Error>(())
//! ```

pub mod ai;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;

pub use ai::{analyze, choose_move, evaluate};
pub use error::{Error, Result};
pub use game::{
    GameOutcome, Grid, Move, OverflowRecord, Player, Recorder, Session, resolve, resolve_recorded,
};

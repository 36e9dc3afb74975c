//! Chain-reaction game model

pub mod grid;
pub mod overflow;
pub mod record;
pub mod session;

pub use grid::{Grid, Move, Player};
pub use overflow::{overflowing_cells, resolve, resolve_recorded};
pub use record::{OverflowRecord, Recorder};
pub use session::{GameOutcome, Session};

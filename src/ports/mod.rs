//! Ports (trait boundaries) between the game core and its drivers.
//!
//! The match pipeline only talks to players through [`Agent`] and to
//! anything watching a match through [`Observer`]; concrete agents and
//! observers live in [`crate::pipeline`].

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;

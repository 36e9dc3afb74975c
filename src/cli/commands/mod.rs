//! Subcommands of the overflow binary

pub mod analyze;
pub mod play;
pub mod resolve;

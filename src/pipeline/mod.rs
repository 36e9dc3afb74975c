//! Match pipeline
//!
//! This module provides:
//! - Agent adapters (minimax search, uniform random)
//! - A headless runner playing series of games between two agents
//! - Observers recording progress, metrics and move logs

pub mod agents;
pub mod matches;
pub mod observers;

pub use agents::{MinimaxAgent, RandomAgent};
pub use matches::{GameReport, MatchConfig, MatchRunner, SeriesResult};
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, MoveObservation, ProgressObserver,
};

pub use crate::ports::{Agent, Observer};

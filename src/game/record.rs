//! Snapshot buffers for cascade playback

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Sink for the intermediate grids produced while a chain reaction resolves.
///
/// The simulator calls [`Recorder::record`] once per cascade step and never
/// reads the recorder back.
pub trait Recorder {
    fn record(&mut self, snapshot: &Grid);
}

impl Recorder for Vec<Grid> {
    fn record(&mut self, snapshot: &Grid) {
        self.push(snapshot.clone());
    }
}

/// FIFO queue of cascade snapshots, consumed frame by frame by a renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowRecord {
    frames: VecDeque<Grid>,
}

impl OverflowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot at the back
    pub fn push(&mut self, snapshot: Grid) {
        self.frames.push_back(snapshot);
    }

    /// Take the oldest snapshot
    pub fn pop_front(&mut self) -> Option<Grid> {
        self.frames.pop_front()
    }

    /// Peek at the oldest snapshot
    pub fn front(&self) -> Option<&Grid> {
        self.frames.front()
    }

    /// Most recent snapshot, i.e. the resolved grid
    pub fn back(&self) -> Option<&Grid> {
        self.frames.back()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grid> {
        self.frames.iter()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Recorder for OverflowRecord {
    fn record(&mut self, snapshot: &Grid) {
        self.push(snapshot.clone());
    }
}

impl IntoIterator for OverflowRecord {
    type Item = Grid;
    type IntoIter = std::collections::vec_deque::IntoIter<Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

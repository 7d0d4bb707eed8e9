//! Bounded history of configuration snapshots for undo.

use crate::types::Configuration;
use std::collections::VecDeque;

/// A stack of immutable snapshots with a fixed capacity.
///
/// Pushing past capacity drops the oldest snapshot first.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Configuration>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Configuration) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Configuration> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

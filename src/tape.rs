//! A sparse, bidirectionally unbounded tape.

use crate::types::{TapeSnapshot, TuringMachineError, MAX_WINDOW_RADIUS};
use std::collections::BTreeMap;

/// The machine tape: written cells keyed by signed position, plus the head.
///
/// Cells that were never written read as blank. Writing the blank removes the cell, so
/// "written blank" and "never written" are the same thing in storage as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: BTreeMap<i64, char>,
    head: i64,
    blank: char,
}

impl Tape {
    pub fn new(blank: char) -> Self {
        Self {
            cells: BTreeMap::new(),
            head: 0,
            blank,
        }
    }

    /// Creates a tape from explicit cells. Blank cells are dropped.
    pub fn from_cells(
        blank: char,
        cells: impl IntoIterator<Item = (i64, char)>,
        head: i64,
    ) -> Self {
        let mut tape = Self::new(blank);
        for (position, symbol) in cells {
            tape.write(position, symbol);
        }
        tape.head = head;
        tape
    }

    pub fn read(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    pub fn write(&mut self, position: i64, symbol: char) {
        if symbol == self.blank {
            self.cells.remove(&position);
        } else {
            self.cells.insert(position, symbol);
        }
    }

    /// Returns the symbol under the head.
    pub fn current(&self) -> char {
        self.read(self.head)
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn set_head(&mut self, head: i64) {
        self.head = head;
    }

    /// Computes where the head would land after moving by `offset`, without moving it.
    ///
    /// Fails instead of wrapping at the integer range.
    pub fn shifted(&self, offset: i64) -> Result<i64, TuringMachineError> {
        self.head
            .checked_add(offset)
            .ok_or(TuringMachineError::TapeBoundary)
    }

    /// Returns `2 * radius + 1` symbols centered on `center`, fewer at the integer limits.
    ///
    /// `radius` is capped at `MAX_WINDOW_RADIUS`.
    pub fn window(&self, center: i64, radius: usize) -> Vec<char> {
        let radius = radius.min(MAX_WINDOW_RADIUS) as i64;
        (center.saturating_sub(radius)..=center.saturating_add(radius))
            .map(|position| self.read(position))
            .collect()
    }

    /// Returns the lowest and highest written positions, if any cell is written.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let first = self.cells.keys().next()?;
        let last = self.cells.keys().next_back()?;
        Some((*first, *last))
    }

    /// Returns the written range as a string, blanks included.
    ///
    /// | 1 | _ | 1 |   written cells at -1 and 1
    ///  -1   0   1
    ///
    /// renders as "1_1".
    pub fn content(&self) -> String {
        match self.bounds() {
            Some((first, last)) => (first..=last).map(|p| self.read(p)).collect(),
            None => String::new(),
        }
    }

    pub fn cells(&self) -> &BTreeMap<i64, char> {
        &self.cells
    }

    /// Replaces all cells, e.g. when restoring a configuration.
    pub fn set_cells(&mut self, cells: BTreeMap<i64, char>) {
        let blank = self.blank;
        self.cells = cells;
        self.cells.retain(|_, symbol| *symbol != blank);
    }

    /// Blanks every cell holding `symbol`.
    pub fn erase_symbol(&mut self, symbol: char) {
        self.cells.retain(|_, s| *s != symbol);
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn snapshot(&self) -> TapeSnapshot {
        TapeSnapshot {
            cells: self.cells.clone(),
            head: self.head,
        }
    }
}

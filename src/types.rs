//! This module defines the core data structures and types used throughout the Turing Machine
//! engine, including directions, transitions, machine status, import/export records and
//! error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Rule;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// A special input symbol used in cell instructions and tape text to represent the blank symbol.
pub const INPUT_BLANK_SYMBOL: char = '_';
/// The state every new registry starts in.
pub const DEFAULT_START_STATE: &str = "q0";
/// The number of configuration snapshots kept for undo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;
/// The maximum allowed size for a program document in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default step budget for running a machine to completion.
pub const MAX_EXECUTION_STEPS: usize = 10000;
/// The widest radius a tape window is rendered with.
pub const MAX_WINDOW_RADIUS: usize = 4096;

/// Represents the possible moves a Turing Machine head can make after writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
    /// Write the symbol and stop. The state and head are left untouched.
    Halt,
}

impl Direction {
    /// Returns the textual token used by the cell instruction grammar.
    pub fn token(&self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Stay => '.',
            Direction::Halt => '!',
        }
    }

    /// Returns the head offset applied by this move.
    pub fn offset(&self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay | Direction::Halt => 0,
        }
    }
}

impl FromStr for Direction {
    type Err = TuringMachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Direction::Left),
            ">" => Ok(Direction::Right),
            "." => Ok(Direction::Stay),
            "!" => Ok(Direction::Halt),
            _ => Err(TuringMachineError::InvalidMoveSyntax(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The right-hand side of a transition rule: what to write, where to go, and how to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written under the head.
    pub write: char,
    /// The state the machine transitions to. Ignored by `Direction::Halt`.
    pub next_state: String,
    /// The head move applied after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(write: char, next_state: impl Into<String>, direction: Direction) -> Self {
        Self {
            write,
            next_state: next_state.into(),
            direction,
        }
    }

    /// Renders the transition in cell instruction form, e.g. `1 q0 >`.
    ///
    /// The registry blank is rendered as `_`.
    pub fn to_cell(&self, blank: char) -> String {
        let write = if self.write == blank {
            INPUT_BLANK_SYMBOL
        } else {
            self.write
        };

        format!("{} {} {}", write, self.next_state, self.direction)
    }
}

/// A fully keyed transition rule, used for bulk loading and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub state: String,
    pub symbol: char,
    pub write: char,
    pub next_state: String,
    pub direction: Direction,
}

impl RuleEntry {
    pub fn new(
        state: impl Into<String>,
        symbol: char,
        write: char,
        next_state: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            state: state.into(),
            symbol,
            write,
            next_state: next_state.into(),
            direction,
        }
    }

    /// Returns the transition half of this rule.
    pub fn transition(&self) -> Transition {
        Transition::new(self.write, self.next_state.clone(), self.direction)
    }
}

/// The execution status of the machine itself.
///
/// `Ready` and `Running` can be stepped; `Halted` and `Errored` are terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// No step has been taken since the last reset.
    #[default]
    Ready,
    /// At least one step has been taken and the machine can continue.
    Running,
    /// A `Halt` instruction was executed.
    Halted,
    /// No rule matched the current state and symbol.
    Errored,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Halted | Status::Errored)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Halted => "halted",
            Status::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// The observable outcome of a machine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub status: Status,
    pub state: String,
    pub head: i64,
    pub step_count: usize,
}

/// A complete, immutable record of the machine used for undo and saved moments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub state: String,
    pub head: i64,
    pub cells: BTreeMap<i64, char>,
    pub step_count: usize,
}

/// An in-memory export of a program: registry contents and transition rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramData {
    pub states: Vec<String>,
    pub symbols: Vec<char>,
    pub blank: char,
    pub start: String,
    pub rules: Vec<RuleEntry>,
}

/// An in-memory export of the tape: every non-blank cell and the head position.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeSnapshot {
    pub cells: BTreeMap<i64, char>,
    pub head: i64,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A state or symbol was registered twice.
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    /// A rule or query referenced a state that is not registered.
    #[error("Unknown state: {0}")]
    UnknownState(String),
    /// A rule, tape or query referenced a symbol that is not registered.
    #[error("Unknown symbol: {0:?}")]
    UnknownSymbol(char),
    /// A direction token was not one of `<`, `>`, `.`, `!`.
    #[error("Invalid move {0:?}, expected one of '<', '>', '.', '!'")]
    InvalidMoveSyntax(String),
    /// Indicates that there's no rule defined for the current state and symbol.
    #[error("No rule defined for state {state} and symbol {symbol:?}")]
    UndefinedTransition { state: String, symbol: char },
    /// `undo` was called with an empty history.
    #[error("No history to undo")]
    NoHistory,
    /// `run_to_halt` used up its budget before the machine stopped.
    #[error("Machine did not stop within {0} steps")]
    StepBudgetExceeded(usize),
    /// Indicates that the head attempted to move beyond the addressable range.
    #[error("Tape boundary exceeded")]
    TapeBoundary,
    /// The blank symbol and the start state cannot be removed.
    #[error("Reserved identifier cannot be removed: {0}")]
    ReservedIdentifier(String),
    /// `restore_moment` was called before any `save_moment`.
    #[error("No saved moment to restore")]
    NoSavedMoment,
    /// Indicates an error during the parsing of a cell instruction.
    #[error("Instruction parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a structurally invalid program document.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading or writing program files.
    #[error("File error: {0}")]
    FileError(String),
}

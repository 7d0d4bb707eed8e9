//! This crate provides the execution engine for a deterministic single-tape Turing Machine.
//! It includes modules for the symbol and state registry, the transition table, the sparse
//! tape, the reversible machine itself, the cell instruction parser, program documents,
//! program analysis, and a catalog of built-in programs.

pub mod analyzer;
pub mod history;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod registry;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the program document types from the loader module.
pub use loader::{ProgramFile, ProgramLoader, TapeFile};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the cell instruction parser.
pub use parser::parse_instruction;
/// Re-exports `ProgramManager` and `PROGRAMS` from the programs module.
pub use programs::{ProgramManager, PROGRAMS};
pub use registry::Registry;
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports the shared data types and the error type.
pub use types::{
    Direction, ProgramData, RuleEntry, Status, StepReport, TapeSnapshot, Transition,
    TuringMachineError, DEFAULT_HISTORY_CAPACITY, MAX_EXECUTION_STEPS, MAX_WINDOW_RADIUS,
};

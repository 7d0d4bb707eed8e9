//! This module provides advisory checks for Turing Machine programs, run without executing
//! them. Rule validity is already enforced when rules are installed; the analyzer reports
//! programs that are well formed but probably not what the author meant: states that can
//! never be entered, tables without any halt instruction, and tape symbols no rule reads.

use crate::machine::TuringMachine;
use crate::types::Direction;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// A potential problem found in a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// States that are registered but cannot be reached from the start state.
    UnreachableStates(Vec<String>),
    /// No rule uses `Direction::Halt`, so the machine can only stop by erroring.
    NoHaltInstruction,
    /// The created tape contains symbols that no rule reads.
    UnhandledTapeSymbols(Vec<char>),
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {:?}", states)
            }
            AnalysisWarning::NoHaltInstruction => {
                write!(f, "No rule halts the machine")
            }
            AnalysisWarning::UnhandledTapeSymbols(symbols) => write!(
                f,
                "Initial tape contains symbols not handled by any transition: {:?}",
                symbols
            ),
        }
    }
}

/// Analyzes the program loaded into `machine`.
///
/// # Returns
///
/// * All warnings found, in a fixed order. An empty vector means nothing looked suspicious.
pub fn analyze(machine: &TuringMachine) -> Vec<AnalysisWarning> {
    [
        check_unreachable_states,
        check_halt_instruction,
        check_tape_symbols,
    ]
    .iter()
    .filter_map(|f| f(machine))
    .collect()
}

/// Returns the states reachable from the start state by following rules.
fn reachable_states(machine: &TuringMachine) -> BTreeSet<String> {
    let start = machine.registry().start().to_string();
    let mut reachable = BTreeSet::from([start.clone()]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for (state, _, transition) in machine.table().iter() {
            if state != current || transition.direction == Direction::Halt {
                continue;
            }
            if reachable.insert(transition.next_state.clone()) {
                queue.push_back(transition.next_state.clone());
            }
        }
    }

    reachable
}

fn check_unreachable_states(machine: &TuringMachine) -> Option<AnalysisWarning> {
    let reachable = reachable_states(machine);
    let unreachable: Vec<String> = machine
        .registry()
        .states()
        .iter()
        .filter(|s| !reachable.contains(*s))
        .cloned()
        .collect();

    if unreachable.is_empty() {
        None
    } else {
        Some(AnalysisWarning::UnreachableStates(unreachable))
    }
}

fn check_halt_instruction(machine: &TuringMachine) -> Option<AnalysisWarning> {
    let halts = machine
        .table()
        .iter()
        .any(|(_, _, t)| t.direction == Direction::Halt);

    if halts || machine.table().is_empty() {
        None
    } else {
        Some(AnalysisWarning::NoHaltInstruction)
    }
}

fn check_tape_symbols(machine: &TuringMachine) -> Option<AnalysisWarning> {
    let read: BTreeSet<char> = machine.table().iter().map(|(_, symbol, _)| symbol).collect();
    let unhandled: BTreeSet<char> = machine
        .initial_tape()
        .cells()
        .values()
        .copied()
        .filter(|symbol| !read.contains(symbol))
        .collect();

    if unhandled.is_empty() {
        None
    } else {
        Some(AnalysisWarning::UnhandledTapeSymbols(
            unhandled.into_iter().collect(),
        ))
    }
}

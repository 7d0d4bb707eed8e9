//! This module provides the JSON program document and the `ProgramLoader` struct, responsible
//! for reading and writing documents from files and strings.
//!
//! A document looks like this:
//!
//! ```json
//! {
//!   "name": "Unary increment",
//!   "blank": "_",
//!   "start": "q0",
//!   "states": ["q0"],
//!   "symbols": ["_", "1"],
//!   "rules": { "q0": { "1": "1 q0 >", "_": "1 q0 !" } },
//!   "tape": { "origin": 0, "content": "111", "head": 0 }
//! }
//! ```
//!
//! Rules use the cell instruction grammar. The registry of a loaded machine is the union of
//! the declared `states`/`symbols` and the keys of `rules`.

use crate::machine::TuringMachine;
use crate::parser::{parse_instruction, parse_tape};
use crate::types::{
    ProgramData, RuleEntry, TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_START_STATE,
    INPUT_BLANK_SYMBOL, MAX_PROGRAM_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

fn default_blank() -> char {
    DEFAULT_BLANK_SYMBOL
}

fn default_start() -> String {
    DEFAULT_START_STATE.to_string()
}

/// A serialized program: registry, rules in cell syntax, and a tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFile {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_blank")]
    pub blank: char,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<char>,
    /// `state -> symbol -> cell instruction`. Empty cells are ignored.
    #[serde(default)]
    pub rules: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub tape: TapeFile,
}

/// A tape laid out as text starting at `origin`, with `_` for blank cells.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeFile {
    #[serde(default)]
    pub origin: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub head: i64,
}

impl ProgramFile {
    /// Captures a machine's program and current tape.
    pub fn from_machine(name: impl Into<String>, machine: &TuringMachine) -> Self {
        let program = machine.export_program();
        let blank = program.blank;
        let render = |symbol: char| {
            if symbol == blank {
                INPUT_BLANK_SYMBOL
            } else {
                symbol
            }
        };

        let mut rules: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (state, symbol, transition) in machine.table().iter() {
            rules
                .entry(state.to_string())
                .or_default()
                .insert(render(symbol).to_string(), transition.to_cell(blank));
        }

        let tape = machine.tape();
        let tape = TapeFile {
            origin: tape.bounds().map(|(first, _)| first).unwrap_or(0),
            content: tape.content().chars().map(render).collect(),
            head: tape.head(),
        };

        Self {
            name: name.into(),
            blank,
            start: program.start,
            states: program.states,
            symbols: program.symbols,
            rules,
            tape,
        }
    }

    /// Converts the document into the in-memory program representation.
    pub fn program_data(&self) -> Result<ProgramData, TuringMachineError> {
        let mut states = vec![self.start.clone()];
        let mut symbols = vec![self.blank];
        let mut entries = Vec::new();

        let mut add_state = |state: &str| {
            if !states.iter().any(|s| s == state) {
                states.push(state.to_string());
            }
        };
        for state in self.states.iter().chain(self.rules.keys()) {
            add_state(state.as_str());
        }

        for &symbol in &self.symbols {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        for (state, row) in &self.rules {
            for (key, cell) in row {
                let symbol = self.parse_key(state, key)?;
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
                if cell.trim().is_empty() {
                    continue;
                }

                let transition = parse_instruction(cell, self.blank)?;
                entries.push(RuleEntry::new(
                    state.as_str(),
                    symbol,
                    transition.write,
                    transition.next_state,
                    transition.direction,
                ));
            }
        }

        Ok(ProgramData {
            states,
            symbols,
            blank: self.blank,
            start: self.start.clone(),
            rules: entries,
        })
    }

    /// Builds a machine with the document's program and tape installed.
    pub fn to_machine(
        &self,
        history_capacity: usize,
    ) -> Result<TuringMachine, TuringMachineError> {
        let mut machine = TuringMachine::with_history_capacity(history_capacity);
        machine.import_program(self.program_data()?)?;

        let cells = parse_tape(&self.tape.content, self.blank)
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| (self.tape.origin.saturating_add(i as i64), symbol));
        machine.create_tape(cells, self.tape.head)?;

        Ok(machine)
    }

    fn parse_key(&self, state: &str, key: &str) -> Result<char, TuringMachineError> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(INPUT_BLANK_SYMBOL), None) => Ok(self.blank),
            (Some(symbol), None) => Ok(symbol),
            _ => Err(TuringMachineError::ValidationError(format!(
                "Rule key {key:?} in state {state} must be a single symbol"
            ))),
        }
    }
}

/// `ProgramLoader` is a utility struct for reading and writing program documents.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a program document from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(ProgramFile)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ValidationError)` if the content is not a valid document.
    pub fn load_program(path: &Path) -> Result<ProgramFile, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let program = Self::load_program_from_string(&content)?;
        info!(path = %path.display(), name = %program.name, "Loaded program");

        Ok(program)
    }

    /// Parses a program document from string content.
    pub fn load_program_from_string(content: &str) -> Result<ProgramFile, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::ValidationError(format!(
                "Program is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        serde_json::from_str(content)
            .map_err(|e| TuringMachineError::ValidationError(format!("Invalid program: {e}")))
    }

    /// Serializes a program document as pretty-printed JSON.
    pub fn to_json(program: &ProgramFile) -> Result<String, TuringMachineError> {
        serde_json::to_string_pretty(program)
            .map_err(|e| TuringMachineError::ValidationError(format!("Invalid program: {e}")))
    }

    /// Writes a program document to the specified file path.
    pub fn save_program(path: &Path, program: &ProgramFile) -> Result<(), TuringMachineError> {
        let content = Self::to_json(program)?;
        fs::write(path, content).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), name = %program.name, "Saved program");
        Ok(())
    }
}

//! The alphabet and state registry: the finite sets of symbols and states a program may
//! reference, with the reserved blank symbol and the designated start state.

use crate::types::{
    TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_START_STATE, INPUT_BLANK_SYMBOL,
};
use std::collections::BTreeSet;

/// Registered symbols and states.
///
/// The blank symbol and the start state are members from construction on and can never
/// be removed. States keep their insertion order, which is the order a table editor shows
/// them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    blank: char,
    start: String,
    symbols: BTreeSet<char>,
    states: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_START_STATE, DEFAULT_BLANK_SYMBOL)
    }
}

impl Registry {
    pub fn new(start: impl Into<String>, blank: char) -> Self {
        let start = start.into();

        Self {
            blank,
            symbols: BTreeSet::from([blank]),
            states: vec![start.clone()],
            start,
        }
    }

    /// Registers a new symbol.
    ///
    /// `_` always denotes the blank in cell and tape text, so it can only be registered
    /// as the blank itself.
    pub fn add_symbol(&mut self, symbol: char) -> Result<(), TuringMachineError> {
        if self.has_symbol(symbol) {
            return Err(TuringMachineError::DuplicateIdentifier(symbol.to_string()));
        }
        if symbol == INPUT_BLANK_SYMBOL {
            return Err(TuringMachineError::ReservedIdentifier(symbol.to_string()));
        }

        self.symbols.insert(symbol);

        Ok(())
    }

    /// Registers a new state.
    pub fn add_state(&mut self, state: impl Into<String>) -> Result<(), TuringMachineError> {
        let state = state.into();
        if self.has_state(&state) {
            return Err(TuringMachineError::DuplicateIdentifier(state));
        }

        self.states.push(state);
        Ok(())
    }

    /// Unregisters a symbol. The blank symbol is reserved.
    ///
    /// This only shrinks the registry; callers are responsible for purging rules and tape
    /// cells that still reference the symbol.
    pub fn remove_symbol(&mut self, symbol: char) -> Result<(), TuringMachineError> {
        if self.is_blank(symbol) {
            return Err(TuringMachineError::ReservedIdentifier(symbol.to_string()));
        }
        if !self.symbols.remove(&symbol) {
            return Err(TuringMachineError::UnknownSymbol(symbol));
        }

        Ok(())
    }

    /// Unregisters a state. The start state is reserved.
    pub fn remove_state(&mut self, state: &str) -> Result<(), TuringMachineError> {
        if state == self.start {
            return Err(TuringMachineError::ReservedIdentifier(state.to_string()));
        }

        let index = self
            .states
            .iter()
            .position(|s| s == state)
            .ok_or_else(|| TuringMachineError::UnknownState(state.to_string()))?;
        self.states.remove(index);

        Ok(())
    }

    pub fn is_blank(&self, symbol: char) -> bool {
        symbol == self.blank
    }

    pub fn has_symbol(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// Fails with `UnknownSymbol` unless `symbol` is registered.
    pub fn check_symbol(&self, symbol: char) -> Result<(), TuringMachineError> {
        if self.has_symbol(symbol) {
            Ok(())
        } else {
            Err(TuringMachineError::UnknownSymbol(symbol))
        }
    }

    /// Fails with `UnknownState` unless `state` is registered.
    pub fn check_state(&self, state: &str) -> Result<(), TuringMachineError> {
        if self.has_state(state) {
            Ok(())
        } else {
            Err(TuringMachineError::UnknownState(state.to_string()))
        }
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns all symbols with the blank first, then in character order.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols = vec![self.blank];
        symbols.extend(self.symbols.iter().copied().filter(|&s| s != self.blank));
        symbols
    }

    /// Returns all states in registration order, the start state first.
    pub fn states(&self) -> &[String] {
        &self.states
    }
}

//! The transition table: a partial function from `(state, symbol)` to a `Transition`.

use crate::registry::Registry;
use crate::types::{Direction, RuleEntry, Transition, TuringMachineError};
use std::collections::BTreeMap;

/// Transition rules keyed by `(state, symbol)`.
///
/// Every mutation validates against a `Registry` before committing, so a failed call
/// leaves the table untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    rules: BTreeMap<(String, char), Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list of rules, failing on the first invalid one.
    ///
    /// Later entries for the same key replace earlier ones.
    pub fn from_rules(
        registry: &Registry,
        rules: impl IntoIterator<Item = RuleEntry>,
    ) -> Result<Self, TuringMachineError> {
        let mut table = Self::new();
        for rule in rules {
            table.set_rule(
                registry,
                &rule.state,
                rule.symbol,
                rule.write,
                &rule.next_state,
                rule.direction,
            )?;
        }

        Ok(table)
    }

    /// Installs a rule, replacing any rule already defined for `(state, symbol)`.
    pub fn set_rule(
        &mut self,
        registry: &Registry,
        state: &str,
        symbol: char,
        write: char,
        next_state: &str,
        direction: Direction,
    ) -> Result<(), TuringMachineError> {
        registry.check_state(state)?;
        registry.check_symbol(symbol)?;
        registry.check_symbol(write)?;
        registry.check_state(next_state)?;

        self.rules.insert(
            (state.to_string(), symbol),
            Transition::new(write, next_state, direction),
        );

        Ok(())
    }

    /// Removes the rule for `(state, symbol)`, returning it if one existed.
    pub fn remove_rule(&mut self, state: &str, symbol: char) -> Option<Transition> {
        self.rules.remove(&(state.to_string(), symbol))
    }

    /// Finds the rule for `(state, symbol)`. `None` means no rule is defined.
    pub fn lookup(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.rules.get(&(state.to_string(), symbol))
    }

    /// Drops every rule that reads or writes `symbol`.
    pub fn purge_symbol(&mut self, symbol: char) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|(_, read), transition| *read != symbol && transition.write != symbol);
        before - self.rules.len()
    }

    /// Drops every rule defined for `state` or transitioning into it.
    pub fn purge_state(&mut self, state: &str) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|(from, _), transition| from != state && transition.next_state != state);
        before - self.rules.len()
    }

    /// Iterates over all rules in `(state, symbol)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, char, &Transition)> {
        self.rules
            .iter()
            .map(|((state, symbol), transition)| (state.as_str(), *symbol, transition))
    }

    /// Returns all rules as keyed entries.
    pub fn entries(&self) -> Vec<RuleEntry> {
        self.iter()
            .map(|(state, symbol, t)| {
                RuleEntry::new(state, symbol, t.write, t.next_state.clone(), t.direction)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

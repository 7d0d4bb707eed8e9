//! This module defines the `TuringMachine` struct, which executes a deterministic single-tape
//! Turing machine step by step. It owns the registry, transition table, tape and a bounded
//! undo history, and exposes the mutations and queries a front end drives it with.

use crate::history::History;
use crate::parser::{parse_instruction, parse_tape};
use crate::registry::Registry;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{
    Configuration, Direction, ProgramData, RuleEntry, Status, StepReport, TapeSnapshot,
    Transition, TuringMachineError, DEFAULT_HISTORY_CAPACITY,
};
use tracing::{debug, trace};

/// A deterministic single-tape Turing Machine with reversible execution.
///
/// The machine starts empty: only the blank symbol and the start state are registered, no
/// rules exist and the tape is blank. The tape last installed through `create_tape` is
/// remembered and restored whenever a new table is loaded.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    registry: Registry,
    table: TransitionTable,
    tape: Tape,
    initial_tape: Tape,
    state: String,
    status: Status,
    step_count: usize,
    history: History,
    moment: Option<Configuration>,
}

impl Default for TuringMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TuringMachine {
    /// Creates an empty machine with the default registry and history capacity.
    pub fn new() -> Self {
        Self::with_registry(Registry::default(), DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates an empty machine that keeps at most `capacity` undo snapshots.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self::with_registry(Registry::default(), capacity)
    }

    /// Creates an empty machine over an existing registry.
    pub fn with_registry(registry: Registry, capacity: usize) -> Self {
        let tape = Tape::new(registry.blank());

        Self {
            state: registry.start().to_string(),
            registry,
            table: TransitionTable::new(),
            initial_tape: tape.clone(),
            tape,
            status: Status::Ready,
            step_count: 0,
            history: History::new(capacity),
            moment: None,
        }
    }

    /// Registers a new state.
    pub fn add_state(&mut self, state: impl Into<String>) -> Result<(), TuringMachineError> {
        self.registry.add_state(state)
    }

    /// Registers a new symbol.
    pub fn add_symbol(&mut self, symbol: char) -> Result<(), TuringMachineError> {
        self.registry.add_symbol(symbol)
    }

    /// Unregisters a state and every rule that reads from or transitions into it.
    ///
    /// History is cleared, and so is a saved moment taken in the removed state. If the
    /// machine is currently in the removed state it restarts from the start state on the
    /// current tape.
    pub fn remove_state(&mut self, state: &str) -> Result<(), TuringMachineError> {
        self.registry.remove_state(state)?;
        let purged = self.table.purge_state(state);
        self.history.clear();

        if self.moment.as_ref().is_some_and(|m| m.state == state) {
            self.moment = None;
        }
        if self.state == state {
            self.restart(self.tape.clone());
        }

        debug!(state, purged, "Removed state");
        Ok(())
    }

    /// Unregisters a symbol, every rule that reads or writes it, and every tape cell
    /// holding it, including cells of the created tape and of a saved moment.
    pub fn remove_symbol(&mut self, symbol: char) -> Result<(), TuringMachineError> {
        self.registry.remove_symbol(symbol)?;
        let purged = self.table.purge_symbol(symbol);
        self.tape.erase_symbol(symbol);
        self.initial_tape.erase_symbol(symbol);
        self.history.clear();

        if let Some(moment) = &mut self.moment {
            moment.cells.retain(|_, s| *s != symbol);
        }

        debug!(%symbol, purged, "Removed symbol");
        Ok(())
    }

    /// Installs a transition rule, replacing any rule for the same `(state, symbol)`.
    pub fn set_rule(
        &mut self,
        state: &str,
        symbol: char,
        write: char,
        next_state: &str,
        direction: Direction,
    ) -> Result<(), TuringMachineError> {
        self.table
            .set_rule(&self.registry, state, symbol, write, next_state, direction)
    }

    /// Applies the text of a table cell, e.g. `1 q0 >`, to `(state, symbol)`.
    ///
    /// Empty text clears the cell. Returns the installed transition, if any.
    pub fn set_cell(
        &mut self,
        state: &str,
        symbol: char,
        text: &str,
    ) -> Result<Option<Transition>, TuringMachineError> {
        if text.trim().is_empty() {
            self.registry.check_state(state)?;
            self.registry.check_symbol(symbol)?;
            self.table.remove_rule(state, symbol);
            return Ok(None);
        }

        let transition = parse_instruction(text, self.registry.blank())?;
        self.set_rule(
            state,
            symbol,
            transition.write,
            &transition.next_state,
            transition.direction,
        )?;

        Ok(Some(transition))
    }

    /// Replaces the whole rule set and resets execution onto the created tape.
    ///
    /// Nothing changes unless every rule is valid.
    pub fn load_table(
        &mut self,
        rules: impl IntoIterator<Item = RuleEntry>,
    ) -> Result<(), TuringMachineError> {
        self.table = TransitionTable::from_rules(&self.registry, rules)?;
        self.restart(self.initial_tape.clone());

        debug!(rules = self.table.len(), "Loaded transition table");
        Ok(())
    }

    /// Replaces the tape contents and head position, keeping the rules.
    ///
    /// State, step count and history are reset. Every symbol must be registered.
    pub fn create_tape(
        &mut self,
        cells: impl IntoIterator<Item = (i64, char)>,
        head: i64,
    ) -> Result<(), TuringMachineError> {
        let cells: Vec<(i64, char)> = cells.into_iter().collect();
        for &(_, symbol) in &cells {
            self.registry.check_symbol(symbol)?;
        }

        let tape = Tape::from_cells(self.registry.blank(), cells, head);
        self.initial_tape = tape.clone();
        self.restart(tape);

        debug!(head, content = %self.tape.content(), "Created tape");
        Ok(())
    }

    /// Creates a tape from text laid out from position 0, with `_` as the blank.
    pub fn create_tape_from_str(
        &mut self,
        input: &str,
        head: i64,
    ) -> Result<(), TuringMachineError> {
        let cells = parse_tape(input, self.registry.blank())
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| (i as i64, symbol));

        self.create_tape(cells, head)
    }

    /// Executes a single step of the machine.
    ///
    /// # Returns
    ///
    /// * `Ok(StepReport)` after a move or a halt, or unchanged when the machine is already
    ///   `Halted` or `Errored`.
    /// * `Err(TuringMachineError::UndefinedTransition)` if no rule matches. The machine is
    ///   then `Errored`, and the configuration before the call is on the history so `undo`
    ///   can recover.
    /// * `Err(TuringMachineError::TapeBoundary)` if the head would leave the integer range.
    ///   Nothing is changed.
    pub fn step(&mut self) -> Result<StepReport, TuringMachineError> {
        if self.status.is_terminal() {
            return Ok(self.report());
        }

        let symbol = self.tape.current();
        let transition = match self.table.lookup(&self.state, symbol).cloned() {
            Some(t) => t,
            None => {
                self.history.push(self.configuration());
                self.status = Status::Errored;

                debug!(state = %self.state, %symbol, "No transition defined");
                return Err(TuringMachineError::UndefinedTransition {
                    state: self.state.clone(),
                    symbol,
                });
            }
        };

        // Resolve the move before mutating anything.
        let head = self.tape.shifted(transition.direction.offset())?;

        self.history.push(self.configuration());
        self.tape.write(self.tape.head(), transition.write);

        if transition.direction == Direction::Halt {
            self.status = Status::Halted;
            debug!(state = %self.state, steps = self.step_count, "Machine halted");
            return Ok(self.report());
        }

        self.tape.set_head(head);
        self.state = transition.next_state;
        self.step_count += 1;
        self.status = Status::Running;

        trace!(
            step = self.step_count,
            state = %self.state,
            head,
            "Step"
        );

        Ok(self.report())
    }

    /// Steps until the machine halts or errors, or `max_steps` steps have been taken.
    ///
    /// When the budget runs out the machine is left steppable where it stopped and
    /// `StepBudgetExceeded` is returned.
    pub fn run_to_halt(&mut self, max_steps: usize) -> Result<StepReport, TuringMachineError> {
        for _ in 0..max_steps {
            if self.status.is_terminal() {
                break;
            }
            self.step()?;
        }

        if self.status.is_terminal() {
            Ok(self.report())
        } else {
            debug!(max_steps, "Step budget exceeded");
            Err(TuringMachineError::StepBudgetExceeded(max_steps))
        }
    }

    /// Reverts the most recent step, including a step that ended in `Errored`.
    pub fn undo(&mut self) -> Result<StepReport, TuringMachineError> {
        let snapshot = self.history.pop().ok_or(TuringMachineError::NoHistory)?;
        self.apply(snapshot);

        debug!(steps = self.step_count, depth = self.history.len(), "Undo");
        Ok(self.report())
    }

    /// Clears the tape, moves the head to 0 and returns to the start state. Rules are kept.
    pub fn reset(&mut self) {
        self.restart(Tape::new(self.registry.blank()));
        debug!("Reset machine");
    }

    /// Remembers the current configuration for `restore_moment`.
    pub fn save_moment(&mut self) {
        self.moment = Some(self.configuration());
    }

    /// Returns to the configuration stored by `save_moment`.
    ///
    /// The configuration being replaced is pushed onto history, so the restore can be
    /// undone.
    pub fn restore_moment(&mut self) -> Result<StepReport, TuringMachineError> {
        let moment = self.moment.clone().ok_or(TuringMachineError::NoSavedMoment)?;
        self.history.push(self.configuration());
        self.apply(moment);

        Ok(self.report())
    }

    /// Exports the registry and rules.
    pub fn export_program(&self) -> ProgramData {
        ProgramData {
            states: self.registry.states().to_vec(),
            symbols: self.registry.symbols(),
            blank: self.registry.blank(),
            start: self.registry.start().to_string(),
            rules: self.table.entries(),
        }
    }

    /// Exports the current tape.
    pub fn export_tape_snapshot(&self) -> TapeSnapshot {
        self.tape.snapshot()
    }

    /// Replaces registry and rules with `data`, leaving a blank tape in the start state.
    ///
    /// Nothing changes unless the whole program is valid.
    pub fn import_program(&mut self, data: ProgramData) -> Result<(), TuringMachineError> {
        let mut registry = Registry::new(data.start, data.blank);
        for symbol in data.symbols {
            if !registry.is_blank(symbol) {
                registry.add_symbol(symbol)?;
            }
        }
        for state in data.states {
            if state != registry.start() {
                registry.add_state(state)?;
            }
        }
        let table = TransitionTable::from_rules(&registry, data.rules)?;

        self.registry = registry;
        self.table = table;
        self.initial_tape = Tape::new(self.registry.blank());
        self.moment = None;
        self.restart(self.initial_tape.clone());

        debug!(
            states = self.registry.states().len(),
            rules = self.table.len(),
            "Imported program"
        );
        Ok(())
    }

    /// Installs a tape snapshot, same as `create_tape`.
    pub fn import_tape_snapshot(
        &mut self,
        snapshot: TapeSnapshot,
    ) -> Result<(), TuringMachineError> {
        self.create_tape(snapshot.cells, snapshot.head)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn head(&self) -> i64 {
        self.tape.head()
    }

    /// Returns the number of moves executed since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns `2 * radius + 1` symbols centered on the head.
    pub fn tape_window(&self, radius: usize) -> Vec<char> {
        self.tape.window(self.tape.head(), radius)
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the tape installed by the last `create_tape`.
    pub fn initial_tape(&self) -> &Tape {
        &self.initial_tape
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the rule that the next step would apply.
    pub fn transition(&self) -> Option<&Transition> {
        self.table.lookup(&self.state, self.tape.current())
    }

    /// Returns the status, state, head and step count.
    pub fn report(&self) -> StepReport {
        StepReport {
            status: self.status,
            state: self.state.clone(),
            head: self.tape.head(),
            step_count: self.step_count,
        }
    }

    fn configuration(&self) -> Configuration {
        Configuration {
            state: self.state.clone(),
            head: self.tape.head(),
            cells: self.tape.cells().clone(),
            step_count: self.step_count,
        }
    }

    fn apply(&mut self, snapshot: Configuration) {
        self.state = snapshot.state;
        self.tape.set_cells(snapshot.cells);
        self.tape.set_head(snapshot.head);
        self.step_count = snapshot.step_count;
        self.status = if self.step_count == 0 {
            Status::Ready
        } else {
            Status::Running
        };
    }

    fn restart(&mut self, tape: Tape) {
        self.tape = tape;
        self.state = self.registry.start().to_string();
        self.step_count = 0;
        self.status = Status::Ready;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// States `{q0}`, alphabet `{1, _}`, tape `111` with the head at 0.
    fn unary_increment(with_halt_rule: bool) -> TuringMachine {
        let mut machine = TuringMachine::new();
        machine.add_symbol('1').unwrap();
        machine
            .set_rule("q0", '1', '1', "q0", Direction::Right)
            .unwrap();
        if with_halt_rule {
            machine
                .set_rule("q0", '_', '1', "q0", Direction::Halt)
                .unwrap();
        }
        machine.create_tape_from_str("111", 0).unwrap();
        machine
    }

    #[test]
    fn test_new_machine_is_empty() {
        let machine = TuringMachine::new();

        assert_eq!(machine.status(), Status::Ready);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.history_depth(), 0);
        assert!(machine.table().is_empty());
        assert_eq!(machine.tape_window(1), vec!['_', '_', '_']);
    }

    #[test]
    fn test_unary_increment_runs_to_halt() {
        let mut machine = unary_increment(true);

        let report = machine.run_to_halt(10).unwrap();

        assert_eq!(report.status, Status::Halted);
        assert_eq!(report.step_count, 3);
        assert_eq!(machine.tape().content(), "1111");
        assert_eq!(machine.head(), 3);
        assert_eq!(machine.state(), "q0");
    }

    #[test]
    fn test_undefined_transition_scenario() {
        let mut machine = unary_increment(false);

        let result = machine.run_to_halt(10);

        assert_eq!(
            result,
            Err(TuringMachineError::UndefinedTransition {
                state: "q0".to_string(),
                symbol: '_',
            })
        );
        assert_eq!(machine.status(), Status::Errored);
        assert_eq!(machine.step_count(), 3);
        assert_eq!(machine.tape().content(), "111");
        assert_eq!(machine.head(), 3);
    }

    #[test]
    fn test_undefined_transition_is_atomic() {
        let mut machine = unary_increment(false);
        machine.run_to_halt(3).unwrap_err();
        assert_eq!(machine.status(), Status::Running);
        let depth = machine.history_depth();
        let before = machine.export_tape_snapshot();

        assert!(machine.step().is_err());

        assert_eq!(machine.export_tape_snapshot(), before);
        assert_eq!(machine.history_depth(), depth + 1);
        assert_eq!(machine.status(), Status::Errored);
    }

    #[test]
    fn test_terminal_step_is_noop() {
        let mut machine = unary_increment(false);
        let _ = machine.run_to_halt(10);

        // The error is reported once, later steps just return the status.
        let report = machine.step().unwrap();
        assert_eq!(report.status, Status::Errored);
        assert_eq!(report.step_count, 3);

        let mut machine = unary_increment(true);
        machine.run_to_halt(10).unwrap();
        let depth = machine.history_depth();

        let report = machine.step().unwrap();
        assert_eq!(report.status, Status::Halted);
        assert_eq!(machine.history_depth(), depth);
    }

    #[test]
    fn test_halt_semantics() {
        let mut machine = TuringMachine::new();
        machine.add_symbol('a').unwrap();
        machine.add_state("q1").unwrap();
        machine
            .set_rule("q0", '_', 'a', "q1", Direction::Halt)
            .unwrap();

        let report = machine.step().unwrap();

        assert_eq!(report.status, Status::Halted);
        assert_eq!(report.state, "q0");
        assert_eq!(report.head, 0);
        assert_eq!(report.step_count, 0);
        assert_eq!(machine.tape().read(0), 'a');
    }

    #[test]
    fn test_undo_after_halt() {
        let mut machine = unary_increment(true);
        machine.run_to_halt(10).unwrap();

        let report = machine.undo().unwrap();

        assert_eq!(report.status, Status::Running);
        assert_eq!(machine.tape().content(), "111");
        assert_eq!(machine.head(), 3);
    }

    #[test]
    fn test_undo_after_error_is_steppable() {
        let mut machine = unary_increment(false);
        let _ = machine.run_to_halt(10);

        let report = machine.undo().unwrap();
        assert_eq!(report.status, Status::Running);
        assert_eq!(report.step_count, 3);
        assert_eq!(report.head, 3);

        // Fix the program and continue from where it stopped.
        machine
            .set_rule("q0", '_', '1', "q0", Direction::Halt)
            .unwrap();
        assert_eq!(machine.step().unwrap().status, Status::Halted);
        assert_eq!(machine.tape().content(), "1111");
    }

    #[test]
    fn test_undo_to_start_is_ready() {
        let mut machine = unary_increment(true);
        machine.step().unwrap();
        machine.step().unwrap();

        machine.undo().unwrap();
        let report = machine.undo().unwrap();

        assert_eq!(report.status, Status::Ready);
        assert_eq!(report.step_count, 0);
        assert_eq!(report.head, 0);
        assert_eq!(machine.undo(), Err(TuringMachineError::NoHistory));
        assert_eq!(machine.status(), Status::Ready);
    }

    #[test]
    fn test_history_capacity() {
        let mut machine = TuringMachine::with_history_capacity(2);
        machine.add_symbol('1').unwrap();
        machine
            .set_rule("q0", '_', '1', "q0", Direction::Right)
            .unwrap();

        for _ in 0..5 {
            machine.step().unwrap();
        }

        assert_eq!(machine.history_depth(), 2);
        assert_eq!(machine.undo().unwrap().step_count, 4);
        assert_eq!(machine.undo().unwrap().step_count, 3);
        assert_eq!(machine.undo(), Err(TuringMachineError::NoHistory));
    }

    #[test]
    fn test_step_budget_exceeded() {
        let mut machine = TuringMachine::new();
        machine
            .set_rule("q0", '_', '_', "q0", Direction::Left)
            .unwrap();

        let result = machine.run_to_halt(25);

        assert_eq!(result, Err(TuringMachineError::StepBudgetExceeded(25)));
        assert_eq!(machine.status(), Status::Running);
        assert_eq!(machine.step_count(), 25);
        assert_eq!(machine.head(), -25);
        assert!(machine.step().is_ok());
    }

    #[test]
    fn test_run_to_halt_on_terminal_machine() {
        let mut machine = unary_increment(true);
        machine.run_to_halt(10).unwrap();

        let report = machine.run_to_halt(0).unwrap();
        assert_eq!(report.status, Status::Halted);
    }

    #[test]
    fn test_stay_direction() {
        let mut machine = TuringMachine::new();
        machine.add_symbol('x').unwrap();
        machine.add_state("q1").unwrap();
        machine
            .set_rule("q0", '_', 'x', "q1", Direction::Stay)
            .unwrap();

        let report = machine.step().unwrap();

        assert_eq!(report.head, 0);
        assert_eq!(report.state, "q1");
        assert_eq!(report.step_count, 1);
        assert_eq!(machine.tape().read(0), 'x');
    }

    #[test]
    fn test_tape_boundary_is_atomic() {
        let mut machine = TuringMachine::new();
        machine.add_symbol('1').unwrap();
        machine
            .set_rule("q0", '_', '1', "q0", Direction::Right)
            .unwrap();
        machine.create_tape(Vec::new(), i64::MAX).unwrap();

        assert_eq!(machine.step(), Err(TuringMachineError::TapeBoundary));
        assert_eq!(machine.status(), Status::Ready);
        assert_eq!(machine.tape().read(i64::MAX), '_');
        assert_eq!(machine.history_depth(), 0);
    }

    #[test]
    fn test_reset() {
        let mut machine = unary_increment(true);
        machine.run_to_halt(10).unwrap();

        machine.reset();

        assert_eq!(machine.status(), Status::Ready);
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.history_depth(), 0);
        assert_eq!(machine.tape().content(), "");
        assert_eq!(machine.table().len(), 2);
    }

    #[test]
    fn test_create_tape_rejects_unknown_symbol() {
        let mut machine = unary_increment(true);
        machine.step().unwrap();

        let result = machine.create_tape_from_str("1x1", 0);

        assert_eq!(result, Err(TuringMachineError::UnknownSymbol('x')));
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tape().content(), "111");
    }

    #[test]
    fn test_create_tape_negative_cells() {
        let mut machine = TuringMachine::new();
        machine.add_symbol('a').unwrap();

        machine.create_tape([(-3, 'a'), (0, '_')], -3).unwrap();

        assert_eq!(machine.head(), -3);
        assert_eq!(machine.tape_window(1), vec!['_', 'a', '_']);
    }

    #[test]
    fn test_load_table_resets_to_created_tape() {
        let mut machine = unary_increment(true);
        machine.step().unwrap();
        machine.step().unwrap();

        machine
            .load_table(vec![
                RuleEntry::new("q0", '1', '_', "q0", Direction::Right),
                RuleEntry::new("q0", '_', '_', "q0", Direction::Halt),
            ])
            .unwrap();

        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.history_depth(), 0);
        assert_eq!(machine.tape().content(), "111");
        assert_eq!(machine.table().len(), 2);

        machine.run_to_halt(10).unwrap();
        assert_eq!(machine.tape().content(), "");
    }

    #[test]
    fn test_load_table_is_atomic() {
        let mut machine = unary_increment(true);
        machine.step().unwrap();

        let result = machine.load_table(vec![
            RuleEntry::new("q0", '1', '1', "q0", Direction::Left),
            RuleEntry::new("q0", '_', '1', "q5", Direction::Right),
        ]);

        assert_eq!(result, Err(TuringMachineError::UnknownState("q5".to_string())));
        assert_eq!(
            machine.table().lookup("q0", '1'),
            Some(&Transition::new('1', "q0", Direction::Right))
        );
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_set_cell() {
        let mut machine = TuringMachine::new();
        machine.add_symbol('1').unwrap();
        machine.add_state("q1").unwrap();

        let installed = machine.set_cell("q0", '1', "_ q1 <").unwrap();
        assert_eq!(installed, Some(Transition::new('_', "q1", Direction::Left)));

        assert_eq!(
            machine.set_cell("q0", '1', "1 q1 R"),
            Err(TuringMachineError::InvalidMoveSyntax("R".to_string()))
        );
        assert_eq!(
            machine.set_cell("q0", '1', "1 q7 >"),
            Err(TuringMachineError::UnknownState("q7".to_string()))
        );
        assert_eq!(
            machine.table().lookup("q0", '1'),
            Some(&Transition::new('_', "q1", Direction::Left))
        );

        assert_eq!(machine.set_cell("q0", '1', "  ").unwrap(), None);
        assert!(machine.table().is_empty());
    }

    #[test]
    fn test_save_and_restore_moment() {
        let mut machine = unary_increment(true);
        assert_eq!(
            machine.restore_moment(),
            Err(TuringMachineError::NoSavedMoment)
        );

        machine.step().unwrap();
        machine.save_moment();
        machine.run_to_halt(10).unwrap();

        let report = machine.restore_moment().unwrap();
        assert_eq!(report.status, Status::Running);
        assert_eq!(report.step_count, 1);
        assert_eq!(report.head, 1);
        assert_eq!(machine.tape().content(), "111");

        // The restore itself can be undone.
        let report = machine.undo().unwrap();
        assert_eq!(report.step_count, 3);
        assert_eq!(machine.tape().content(), "1111");
    }

    #[test]
    fn test_remove_symbol_cascades() {
        let mut machine = unary_increment(true);
        machine.add_symbol('x').unwrap();
        machine
            .set_rule("q0", 'x', 'x', "q0", Direction::Left)
            .unwrap();
        machine.create_tape_from_str("1x1", 0).unwrap();
        machine.step().unwrap();

        machine.remove_symbol('x').unwrap();

        assert!(!machine.registry().has_symbol('x'));
        assert_eq!(machine.table().lookup("q0", 'x'), None);
        assert_eq!(machine.table().len(), 2);
        assert_eq!(machine.tape().content(), "1_1");
        assert_eq!(machine.initial_tape().content(), "1_1");
        assert_eq!(machine.history_depth(), 0);
    }

    #[test]
    fn test_remove_symbol_keeps_saved_moment() {
        let mut machine = unary_increment(true);
        machine.add_symbol('x').unwrap();
        machine.create_tape_from_str("1x1", 0).unwrap();
        machine.step().unwrap();
        machine.save_moment();

        machine.remove_symbol('x').unwrap();
        machine.step().unwrap();

        let report = machine.restore_moment().unwrap();
        assert_eq!(report.step_count, 1);
        assert_eq!(report.head, 1);
        assert_eq!(machine.tape().content(), "1_1");
    }

    #[test]
    fn test_remove_state_of_saved_moment() {
        let mut machine = TuringMachine::new();
        machine.add_state("q1").unwrap();
        machine.add_state("q2").unwrap();
        machine
            .set_rule("q0", '_', '_', "q1", Direction::Right)
            .unwrap();
        machine.step().unwrap();
        machine.save_moment();

        machine.remove_state("q2").unwrap();
        assert_eq!(machine.restore_moment().unwrap().state, "q1");

        machine.remove_state("q1").unwrap();
        assert_eq!(
            machine.restore_moment(),
            Err(TuringMachineError::NoSavedMoment)
        );
    }

    #[test]
    fn test_remove_reserved_identifiers() {
        let mut machine = TuringMachine::new();

        assert_eq!(
            machine.remove_symbol('_'),
            Err(TuringMachineError::ReservedIdentifier("_".to_string()))
        );
        assert_eq!(
            machine.remove_state("q0"),
            Err(TuringMachineError::ReservedIdentifier("q0".to_string()))
        );
    }

    #[test]
    fn test_remove_current_state() {
        let mut machine = TuringMachine::new();
        machine.add_state("q1").unwrap();
        machine
            .set_rule("q0", '_', '_', "q1", Direction::Right)
            .unwrap();
        machine
            .set_rule("q1", '_', '_', "q0", Direction::Right)
            .unwrap();
        machine.step().unwrap();
        assert_eq!(machine.state(), "q1");

        machine.remove_state("q1").unwrap();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.status(), Status::Ready);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.head(), 1);
        assert!(machine.table().is_empty());
        assert_eq!(machine.undo(), Err(TuringMachineError::NoHistory));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut machine = unary_increment(true);
        machine.add_state("unused").unwrap();

        let program = machine.export_program();
        let tape = machine.export_tape_snapshot();

        let mut copy = TuringMachine::new();
        copy.import_program(program.clone()).unwrap();
        copy.import_tape_snapshot(tape.clone()).unwrap();

        assert_eq!(copy.export_program(), program);
        assert_eq!(copy.export_tape_snapshot(), tape);
        assert_eq!(copy.run_to_halt(10), machine.run_to_halt(10));
        assert_eq!(copy.tape().content(), machine.tape().content());
    }

    #[test]
    fn test_import_program_is_atomic() {
        let mut machine = unary_increment(true);
        let mut program = machine.export_program();
        program
            .rules
            .push(RuleEntry::new("q0", 'z', '1', "q0", Direction::Stay));

        assert_eq!(
            machine.import_program(program),
            Err(TuringMachineError::UnknownSymbol('z'))
        );
        assert_eq!(machine.table().len(), 2);
        assert_eq!(machine.tape().content(), "111");
    }

    #[test]
    fn test_import_program_with_custom_blank() {
        let mut machine = TuringMachine::new();
        machine
            .import_program(ProgramData {
                states: vec!["start".to_string(), "done".to_string()],
                symbols: vec!['B', 'a'],
                blank: 'B',
                start: "start".to_string(),
                rules: vec![RuleEntry::new("start", 'B', 'a', "done", Direction::Right)],
            })
            .unwrap();

        assert_eq!(machine.state(), "start");
        machine.create_tape_from_str("_a", 0).unwrap();
        assert_eq!(machine.tape().read(0), 'B');

        let report = machine.step().unwrap();
        assert_eq!(report.state, "done");
        assert_eq!(machine.tape().content(), "aa");
    }
}

//! This module provides the parser for the cell instruction grammar, utilizing the `pest` crate.
//!
//! A table cell holds `<write_symbol> <next_state> <direction>`, where `_` stands for the
//! blank symbol and the direction is one of `<`, `>`, `.` or `!`. Parsing is purely
//! syntactic: whether the symbols and states exist is checked when the resulting
//! `Transition` is installed.

use crate::types::{Direction, Transition, TuringMachineError, INPUT_BLANK_SYMBOL};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the cell instruction grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct InstructionParser;

/// Parses a cell instruction such as `1 q0 >` into a `Transition`.
///
/// # Arguments
///
/// * `input` - The cell text.
/// * `blank` - The registry blank that `_` is rewritten to.
///
/// # Returns
///
/// * `Ok(Transition)` if the instruction is well formed.
/// * `Err(TuringMachineError::ParseError)` if it does not have exactly three tokens, or the
///   write token is not a single symbol.
/// * `Err(TuringMachineError::InvalidMoveSyntax)` if the direction token is not recognized.
pub fn parse_instruction(input: &str, blank: char) -> Result<Transition, TuringMachineError> {
    let root = InstructionParser::parse(Rule::instruction, input.trim())
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty instruction".to_string()))?;

    let mut write = None;
    let mut next_state = None;
    let mut direction = None;

    for p in root.into_inner() {
        match p.as_rule() {
            Rule::write => write = Some(parse_symbol(p, blank)?),
            Rule::state => next_state = Some(p.as_str().to_string()),
            Rule::direction => direction = Some(p.as_str().parse::<Direction>()?),
            _ => {} // EOI
        }
    }

    match (write, next_state, direction) {
        (Some(write), Some(next_state), Some(direction)) => Ok(Transition {
            write,
            next_state,
            direction,
        }),
        _ => Err(TuringMachineError::ValidationError(format!(
            "Incomplete instruction: {input}"
        ))),
    }
}

/// Converts tape text into symbols, rewriting `_` to `blank`.
pub fn parse_tape(input: &str, blank: char) -> Vec<char> {
    input.chars().map(|c| rewrite_blank(c, blank)).collect()
}

/// Parses the single-character write symbol.
fn parse_symbol(pair: Pair<Rule>, blank: char) -> Result<char, TuringMachineError> {
    let span = pair.as_span();
    let mut chars = pair.as_str().chars();

    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(rewrite_blank(symbol, blank)),
        _ => Err(parse_error(
            &format!("Symbol must be a single character: {}", pair.as_str()),
            span,
        )),
    }
}

fn rewrite_blank(symbol: char, blank: char) -> char {
    if symbol == INPUT_BLANK_SYMBOL {
        blank
    } else {
        symbol
    }
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

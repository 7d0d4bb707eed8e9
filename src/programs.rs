use crate::loader::{ProgramFile, ProgramLoader};
use crate::types::TuringMachineError;
use tracing::warn;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/unary-increment.json"),
    include_str!("../programs/binary-increment.json"),
    include_str!("../programs/bubble-sort.json"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<ProgramFile> = load_embedded();
}

fn load_embedded() -> Vec<ProgramFile> {
    PROGRAM_TEXTS
        .iter()
        .filter_map(|text| match ProgramLoader::load_program_from_string(text) {
            Ok(program) => Some(program),
            Err(e) => {
                warn!(error = %e, "Failed to parse embedded program");
                None
            }
        })
        .collect()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get the names of all available programs
    pub fn names() -> Vec<String> {
        PROGRAMS.iter().map(|p| p.name.clone()).collect()
    }

    /// Get a program by its index
    pub fn get_by_index(index: usize) -> Result<ProgramFile, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_by_name(name: &str) -> Result<ProgramFile, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }
}

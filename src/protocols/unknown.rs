use serde::Serialize;

use crate::core::constants::instruction_names;

/// Placeholder for a top-level instruction owned by an unregistered program.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UnknownInstruction {
    pub program_id: String,
    pub instruction_index: usize,
}

impl UnknownInstruction {
    pub fn new(program_id: impl Into<String>, instruction_index: usize) -> Self {
        Self {
            program_id: program_id.into(),
            instruction_index,
        }
    }

    pub fn name(&self) -> &'static str {
        instruction_names::UNKNOWN
    }
}

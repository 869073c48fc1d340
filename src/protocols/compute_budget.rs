use serde::Serialize;

use crate::core::binary_reader::BinaryReader;
use crate::core::constants::{instruction_names, program_ids, program_names};
use crate::core::error::ParserError;
use crate::core::registry::DiscKey;
use crate::protocols::ParsedInstruction;

pub const PROGRAM_ID: &str = program_ids::COMPUTE_BUDGET;

pub const SET_COMPUTE_UNIT_LIMIT: u8 = 2;
pub const SET_COMPUTE_UNIT_PRICE: u8 = 3;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "instruction")]
pub enum ComputeBudgetInstruction {
    SetComputeUnitLimit { compute_unit_limit: u32 },
    SetComputeUnitPrice { micro_lamports: u64 },
}

impl ComputeBudgetInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetComputeUnitLimit { .. } => instruction_names::SET_COMPUTE_UNIT_LIMIT,
            Self::SetComputeUnitPrice { .. } => instruction_names::SET_COMPUTE_UNIT_PRICE,
        }
    }
}

pub fn decode(key: DiscKey, data: &[u8]) -> Result<ParsedInstruction, ParserError> {
    let mut reader = BinaryReader::new(data);
    reader.skip(1)?;
    let instruction = match key {
        DiscKey::U8(SET_COMPUTE_UNIT_LIMIT) => ComputeBudgetInstruction::SetComputeUnitLimit {
            compute_unit_limit: reader.read_u32()?,
        },
        DiscKey::U8(SET_COMPUTE_UNIT_PRICE) => ComputeBudgetInstruction::SetComputeUnitPrice {
            micro_lamports: reader.read_u64()?,
        },
        other => {
            return Err(ParserError::unknown_discriminator(
                program_names::COMPUTE_BUDGET,
                &other.to_bytes(),
            ))
        }
    };
    Ok(ParsedInstruction::ComputeBudget(instruction))
}

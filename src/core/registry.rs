use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::core::binary_reader::BinaryReader;
use crate::core::constants::{program_ids, program_names};
use crate::core::error::ParserError;
use crate::protocols::pumpfun::constants::METHOD_DISCRIMINATOR_LEN;
use crate::protocols::pumpfun::PumpfunDiscriminators;
use crate::protocols::{
    compute_budget, pumpfun, raydium, system, token, ParsedInstruction, UnknownInstruction,
};
use crate::types::Transaction;

static GLOBAL_REGISTRY: Lazy<ProgramRegistry> = Lazy::new(ProgramRegistry::new);

/// Routing key pulled off the front of an instruction payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscKey {
    U8(u8),
    U32(u32),
    Sighash([u8; METHOD_DISCRIMINATOR_LEN]),
}

impl DiscKey {
    /// Wire bytes of the key, used when reporting unknown discriminators.
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::U8(value) => vec![value],
            Self::U32(value) => value.to_le_bytes().to_vec(),
            Self::Sighash(bytes) => bytes.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscriminatorScheme {
    LeadingU8,
    LeadingU32,
    Sighash,
}

impl DiscriminatorScheme {
    pub fn extract(self, data: &[u8]) -> Result<DiscKey, ParserError> {
        let mut reader = BinaryReader::new(data);
        let key = match self {
            Self::LeadingU8 => DiscKey::U8(reader.read_u8()?),
            Self::LeadingU32 => DiscKey::U32(reader.read_u32()?),
            Self::Sighash => {
                let mut discriminator = [0u8; METHOD_DISCRIMINATOR_LEN];
                discriminator.copy_from_slice(reader.read_fixed_array(METHOD_DISCRIMINATOR_LEN)?);
                DiscKey::Sighash(discriminator)
            }
        };
        Ok(key)
    }
}

/// Programs with a dedicated decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Program {
    System,
    ComputeBudget,
    Token,
    RaydiumAmm,
    Pumpfun,
}

impl Program {
    pub const ALL: [Program; 5] = [
        Program::System,
        Program::ComputeBudget,
        Program::Token,
        Program::RaydiumAmm,
        Program::Pumpfun,
    ];

    pub fn program_id(self) -> &'static str {
        match self {
            Self::System => program_ids::SYSTEM,
            Self::ComputeBudget => program_ids::COMPUTE_BUDGET,
            Self::Token => program_ids::TOKEN,
            Self::RaydiumAmm => program_ids::RAYDIUM_AMM,
            Self::Pumpfun => program_ids::PUMP_FUN,
        }
    }

    pub fn program_name(self) -> &'static str {
        match self {
            Self::System => program_names::SYSTEM,
            Self::ComputeBudget => program_names::COMPUTE_BUDGET,
            Self::Token => program_names::TOKEN,
            Self::RaydiumAmm => program_names::RAYDIUM_AMM,
            Self::Pumpfun => program_names::PUMP_FUN,
        }
    }

    pub fn scheme(self) -> DiscriminatorScheme {
        match self {
            Self::System => DiscriminatorScheme::LeadingU32,
            Self::ComputeBudget | Self::Token | Self::RaydiumAmm => DiscriminatorScheme::LeadingU8,
            Self::Pumpfun => DiscriminatorScheme::Sighash,
        }
    }
}

/// Program id → decoder table. Built once and read-only afterwards.
pub struct ProgramRegistry {
    programs: FxHashMap<&'static str, Program>,
    pumpfun: PumpfunDiscriminators,
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramRegistry {
    pub fn new() -> Self {
        let programs = Program::ALL
            .iter()
            .map(|program| (program.program_id(), *program))
            .collect();
        Self {
            programs,
            pumpfun: PumpfunDiscriminators::new(),
        }
    }

    /// Shared registry, safe to use from any thread.
    pub fn global() -> &'static ProgramRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn lookup(&self, program_id: &str) -> Option<Program> {
        self.programs.get(program_id).copied()
    }

    /// Decodes top-level instruction `instruction_index` with its program's decoder.
    pub fn route_and_decode(
        &self,
        tx: &Transaction,
        instruction_index: usize,
    ) -> Result<ParsedInstruction, ParserError> {
        let instruction = tx.instruction(instruction_index)?;
        let program_id = tx.program_id_of(instruction)?;

        let Some(program) = self.lookup(program_id) else {
            tracing::debug!(program_id, instruction_index, "no decoder for program");
            return Ok(ParsedInstruction::Unknown(UnknownInstruction::new(
                program_id,
                instruction_index,
            )));
        };

        let data = bs58::decode(&instruction.data).into_vec()?;
        let key = program.scheme().extract(&data)?;

        match program {
            Program::System => system::decode(tx, instruction_index, key, &data),
            Program::ComputeBudget => compute_budget::decode(key, &data),
            Program::Token => token::decode(tx, instruction_index, key, &data),
            Program::RaydiumAmm => raydium::decode(tx, instruction_index, key, &data),
            Program::Pumpfun => pumpfun::decode(&self.pumpfun, tx, instruction_index, key, &data),
        }
    }

    /// Decodes every top-level instruction in order. The first failure aborts.
    pub fn parse(&self, tx: &Transaction) -> Result<Vec<ParsedInstruction>, ParserError> {
        (0..tx.message.instructions.len())
            .map(|index| self.route_and_decode(tx, index))
            .collect()
    }
}

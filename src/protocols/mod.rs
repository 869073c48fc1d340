pub mod compute_budget;
pub mod pumpfun;
pub mod raydium;
pub mod system;
pub mod token;
pub mod unknown;

use serde::Serialize;

use crate::core::constants::program_names;
use crate::core::error::ParserError;
use crate::types::Transaction;

pub use compute_budget::ComputeBudgetInstruction;
pub use pumpfun::PumpfunInstruction;
pub use raydium::RaydiumInstruction;
pub use system::SystemInstruction;
pub use token::TokenInstruction;
pub use unknown::UnknownInstruction;

/// One decoded top-level instruction, tagged by the program that owns it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum ParsedInstruction {
    System(SystemInstruction),
    ComputeBudget(ComputeBudgetInstruction),
    Token(TokenInstruction),
    RaydiumAmm(RaydiumInstruction),
    Pumpfun(PumpfunInstruction),
    Unknown(UnknownInstruction),
}

impl ParsedInstruction {
    pub fn program_id(&self) -> &str {
        match self {
            Self::System(_) => system::PROGRAM_ID,
            Self::ComputeBudget(_) => compute_budget::PROGRAM_ID,
            Self::Token(_) => token::PROGRAM_ID,
            Self::RaydiumAmm(_) => raydium::PROGRAM_ID,
            Self::Pumpfun(_) => pumpfun::PROGRAM_ID,
            Self::Unknown(unknown) => &unknown.program_id,
        }
    }

    pub fn program_name(&self) -> &'static str {
        match self {
            Self::System(_) => program_names::SYSTEM,
            Self::ComputeBudget(_) => program_names::COMPUTE_BUDGET,
            Self::Token(_) => program_names::TOKEN,
            Self::RaydiumAmm(_) => program_names::RAYDIUM_AMM,
            Self::Pumpfun(_) => program_names::PUMP_FUN,
            Self::Unknown(_) => program_names::UNKNOWN,
        }
    }

    pub fn instruction_name(&self) -> &'static str {
        match self {
            Self::System(ix) => ix.name(),
            Self::ComputeBudget(ix) => ix.name(),
            Self::Token(ix) => ix.name(),
            Self::RaydiumAmm(ix) => ix.name(),
            Self::Pumpfun(ix) => ix.name(),
            Self::Unknown(ix) => ix.name(),
        }
    }
}

/// Account at `position` of an instruction's account list, resolved to its key.
pub(crate) fn required_account(
    tx: &Transaction,
    accounts: &[usize],
    position: usize,
    instruction: &'static str,
) -> Result<String, ParserError> {
    let index = accounts
        .get(position)
        .copied()
        .ok_or_else(|| ParserError::missing_account(instruction, position))?;
    Ok(tx.account_key(index)?.to_string())
}

/// Like [`required_account`], but short account lists yield `None`.
pub(crate) fn optional_account(
    tx: &Transaction,
    accounts: &[usize],
    position: usize,
) -> Result<Option<String>, ParserError> {
    accounts
        .get(position)
        .map(|&index| tx.account_key(index).map(str::to_string))
        .transpose()
}

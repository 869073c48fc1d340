pub mod constants;
pub mod event_parser;
pub mod instruction_parser;

use serde::Serialize;

use crate::core::constants::{instruction_names, program_names};
use crate::core::error::ParserError;
use crate::core::registry::DiscKey;
use crate::protocols::ParsedInstruction;
use crate::types::Transaction;

pub use constants::{sighash, PumpfunDiscriminators};

pub const PROGRAM_ID: &str = constants::PUMP_FUN_PROGRAM_ID;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "instruction")]
pub enum PumpfunInstruction {
    Create(PumpfunCreate),
    Buy(PumpfunTrade),
    Sell(PumpfunTrade),
}

impl PumpfunInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => instruction_names::CREATE,
            Self::Buy(_) => instruction_names::BUY,
            Self::Sell(_) => instruction_names::SELL,
        }
    }
}

/// A bonding-curve trade, expressed as what left and what reached the user.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PumpfunTrade {
    pub who: String,
    pub from_token: String,
    pub from_token_decimals: u8,
    pub to_token: String,
    pub to_token_decimals: u8,
    pub from_token_amount: u64,
    pub to_token_amount: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PumpfunCreate {
    pub who: Option<String>,
    pub mint: Option<String>,
    pub mint_authority: Option<String>,
    pub bonding_curve: Option<String>,
    pub associated_bonding_curve: Option<String>,
    pub mpl_token_metadata: Option<String>,
    pub metadata: Option<String>,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

pub fn decode(
    discriminators: &PumpfunDiscriminators,
    tx: &Transaction,
    instruction_index: usize,
    key: DiscKey,
    data: &[u8],
) -> Result<ParsedInstruction, ParserError> {
    let discriminator = match key {
        DiscKey::Sighash(discriminator) => discriminator,
        other => {
            return Err(ParserError::unknown_discriminator(
                program_names::PUMP_FUN,
                &other.to_bytes(),
            ))
        }
    };

    let instruction = if discriminator == discriminators.buy {
        PumpfunInstruction::Buy(instruction_parser::decode_buy(tx, instruction_index)?)
    } else if discriminator == discriminators.sell {
        PumpfunInstruction::Sell(instruction_parser::decode_sell(tx, instruction_index)?)
    } else if discriminator == discriminators.create {
        PumpfunInstruction::Create(instruction_parser::decode_create(
            tx,
            instruction_index,
            data,
        )?)
    } else {
        return Err(ParserError::unknown_discriminator(
            program_names::PUMP_FUN,
            &discriminator,
        ));
    };

    Ok(ParsedInstruction::Pumpfun(instruction))
}

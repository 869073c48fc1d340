use serde::Serialize;

use crate::core::binary_reader::{BinaryReader, BinaryReaderError, BinaryWriter, Layout};
use crate::core::constants::{
    instruction_names, program_ids, program_names, SOL_DECIMALS, WSOL_MINT,
};
use crate::core::error::ParserError;
use crate::core::registry::DiscKey;
use crate::protocols::{token, ParsedInstruction};
use crate::types::Transaction;

pub const PROGRAM_ID: &str = program_ids::RAYDIUM_AMM;

pub const SWAP: u8 = 9;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "instruction")]
pub enum RaydiumInstruction {
    Swap(RaydiumSwap),
}

impl RaydiumInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Swap(_) => instruction_names::SWAP,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RaydiumSwap {
    pub who: String,
    pub user_source: String,
    pub user_destination: String,
    pub from_token: String,
    pub from_token_amount: u64,
    pub from_token_decimals: u8,
    pub to_token: String,
    /// Taken from the inner token transfer into `user_destination`; 0 when none matched.
    pub to_token_amount: u64,
    pub to_token_decimals: u8,
    pub minimum_amount_out: u64,
}

/// `Swap` payload: u8 opcode, u64 amount in, u64 minimum amount out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapData {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

impl Layout for SwapData {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError> {
        reader.skip(1)?;
        Ok(Self {
            amount_in: reader.read_u64()?,
            minimum_amount_out: reader.read_u64()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError> {
        writer
            .write_u8(SWAP)
            .write_u64(self.amount_in)
            .write_u64(self.minimum_amount_out);
        Ok(())
    }
}

pub fn decode(
    tx: &Transaction,
    instruction_index: usize,
    key: DiscKey,
    data: &[u8],
) -> Result<ParsedInstruction, ParserError> {
    match key {
        DiscKey::U8(SWAP) => decode_swap(tx, instruction_index, data)
            .map(|swap| ParsedInstruction::RaydiumAmm(RaydiumInstruction::Swap(swap))),
        other => Err(ParserError::unknown_discriminator(
            program_names::RAYDIUM_AMM,
            &other.to_bytes(),
        )),
    }
}

fn decode_swap(
    tx: &Transaction,
    instruction_index: usize,
    data: &[u8],
) -> Result<RaydiumSwap, ParserError> {
    let payload = SwapData::decode(data)?;
    let accounts = &tx.instruction(instruction_index)?.accounts;

    // The user's source, destination and signer close out the account list.
    let (source, destination, signer) = match accounts.as_slice() {
        [.., source, destination, signer] => (*source, *destination, *signer),
        _ => {
            return Err(ParserError::missing_account(
                instruction_names::SWAP,
                accounts.len(),
            ))
        }
    };
    let user_source = tx.account_key(source)?.to_string();
    let user_destination = tx.account_key(destination)?.to_string();
    let who = tx.account_key(signer)?.to_string();

    let (mut from_token, mut from_token_decimals) = (WSOL_MINT.to_string(), SOL_DECIMALS);
    let (mut to_token, mut to_token_decimals) = (WSOL_MINT.to_string(), SOL_DECIMALS);
    for balance in tx.token_balances() {
        let token_account = tx.account_key(balance.account_index)?;
        if token_account == user_source {
            from_token = balance.mint.clone();
            from_token_decimals = balance.ui_token_amount.decimals;
        } else if token_account == user_destination {
            to_token = balance.mint.clone();
            to_token_decimals = balance.ui_token_amount.decimals;
        }
    }

    let to_token_amount = received_amount(tx, instruction_index, &user_destination)?;

    Ok(RaydiumSwap {
        who,
        user_source,
        user_destination,
        from_token,
        from_token_amount: payload.amount_in,
        from_token_decimals,
        to_token,
        to_token_amount,
        to_token_decimals,
        minimum_amount_out: payload.minimum_amount_out,
    })
}

/// Amount of the first inner token transfer landing in `destination`.
fn received_amount(
    tx: &Transaction,
    instruction_index: usize,
    destination: &str,
) -> Result<u64, ParserError> {
    for inner in tx.inner_instructions_for(instruction_index) {
        if tx.program_id_of(inner)? != token::PROGRAM_ID {
            continue;
        }
        let action = token::route_instruction(tx, inner)?;
        if let Some((to, amount)) = action.transfer_destination() {
            if to == destination {
                return Ok(amount);
            }
        }
    }

    tracing::debug!(
        instruction_index,
        destination,
        "no inner token transfer into swap destination"
    );
    Ok(0)
}

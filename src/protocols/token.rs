use serde::Serialize;

use crate::core::binary_reader::BinaryReader;
use crate::core::constants::{instruction_names, program_ids, program_names};
use crate::core::error::ParserError;
use crate::core::registry::{DiscKey, Program};
use crate::protocols::{required_account, ParsedInstruction};
use crate::types::{Instruction, Transaction};

pub const PROGRAM_ID: &str = program_ids::TOKEN;

pub const INITIALIZE_ACCOUNT: u8 = 1;
pub const TRANSFER: u8 = 3;
pub const TRANSFER_CHECKED: u8 = 12;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "instruction")]
pub enum TokenInstruction {
    InitializeAccount(InitializeAccount),
    Transfer(TokenTransfer),
    TransferChecked(TokenTransferChecked),
    /// Any opcode this crate does not model.
    Unknown { opcode: u8 },
}

impl TokenInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeAccount(_) => instruction_names::INITIALIZE_ACCOUNT,
            Self::Transfer(_) => instruction_names::TRANSFER,
            Self::TransferChecked(_) => instruction_names::TRANSFER_CHECKED,
            Self::Unknown { .. } => instruction_names::UNKNOWN,
        }
    }

    /// Destination account and raw amount for either transfer flavour.
    pub fn transfer_destination(&self) -> Option<(&str, u64)> {
        match self {
            Self::Transfer(transfer) => Some((transfer.to.as_str(), transfer.amount)),
            Self::TransferChecked(transfer) => Some((transfer.to.as_str(), transfer.amount)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct InitializeAccount {
    pub account: String,
    pub mint: String,
    pub owner: String,
    pub rent_sysvar: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TokenTransfer {
    pub from_account: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TokenTransferChecked {
    pub from_account: String,
    pub mint: String,
    pub to: String,
    pub amount: u64,
    pub decimals: u64,
}

/// Top-level entry point: accounts come from the routed instruction.
pub fn decode(
    tx: &Transaction,
    instruction_index: usize,
    key: DiscKey,
    data: &[u8],
) -> Result<ParsedInstruction, ParserError> {
    let accounts = &tx.instruction(instruction_index)?.accounts;
    decode_with_accounts(tx, key, data, accounts).map(ParsedInstruction::Token)
}

/// Decodes a nested token instruction record on behalf of another decoder.
pub fn route_instruction(
    tx: &Transaction,
    instruction: &Instruction,
) -> Result<TokenInstruction, ParserError> {
    let data = bs58::decode(&instruction.data).into_vec()?;
    let key = Program::Token.scheme().extract(&data)?;
    decode_with_accounts(tx, key, &data, &instruction.accounts)
}

pub fn decode_with_accounts(
    tx: &Transaction,
    key: DiscKey,
    data: &[u8],
    accounts: &[usize],
) -> Result<TokenInstruction, ParserError> {
    let opcode = match key {
        DiscKey::U8(opcode) => opcode,
        other => {
            return Err(ParserError::unknown_discriminator(
                program_names::TOKEN,
                &other.to_bytes(),
            ))
        }
    };

    let mut reader = BinaryReader::new(data);
    reader.skip(1)?;

    let instruction = match opcode {
        INITIALIZE_ACCOUNT => {
            let name = instruction_names::INITIALIZE_ACCOUNT;
            TokenInstruction::InitializeAccount(InitializeAccount {
                account: required_account(tx, accounts, 0, name)?,
                mint: required_account(tx, accounts, 1, name)?,
                owner: required_account(tx, accounts, 2, name)?,
                rent_sysvar: required_account(tx, accounts, 3, name)?,
            })
        }
        TRANSFER => {
            let name = instruction_names::TRANSFER;
            TokenInstruction::Transfer(TokenTransfer {
                from_account: required_account(tx, accounts, 0, name)?,
                to: required_account(tx, accounts, 1, name)?,
                amount: reader.read_u64()?,
            })
        }
        TRANSFER_CHECKED => {
            let name = instruction_names::TRANSFER_CHECKED;
            let amount = reader.read_u64()?;
            // Only the low byte is meaningful; the wire field is 8 bytes wide.
            let decimals = reader.read_u64_available()?;
            TokenInstruction::TransferChecked(TokenTransferChecked {
                from_account: required_account(tx, accounts, 0, name)?,
                mint: required_account(tx, accounts, 1, name)?,
                to: required_account(tx, accounts, 2, name)?,
                amount,
                decimals,
            })
        }
        opcode => TokenInstruction::Unknown { opcode },
    };
    Ok(instruction)
}

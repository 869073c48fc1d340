use serde::Serialize;

use crate::core::binary_reader::{BinaryReader, BinaryReaderError, BinaryWriter, Layout};
use crate::core::constants::{instruction_names, program_ids, program_names};
use crate::core::error::ParserError;
use crate::core::registry::DiscKey;
use crate::protocols::{optional_account, ParsedInstruction};
use crate::types::Transaction;

pub const PROGRAM_ID: &str = program_ids::SYSTEM;

pub const TRANSFER: u32 = 2;
pub const CREATE_ACCOUNT_WITH_SEED: u32 = 3;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "instruction")]
pub enum SystemInstruction {
    Transfer(SystemTransfer),
    CreateAccountWithSeed(CreateAccountWithSeed),
}

impl SystemInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer(_) => instruction_names::TRANSFER,
            Self::CreateAccountWithSeed(_) => instruction_names::CREATE_ACCOUNT_WITH_SEED,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SystemTransfer {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub lamports: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CreateAccountWithSeed {
    pub who: Option<String>,
    pub new_account: Option<String>,
    pub base: String,
    pub seed: String,
    pub lamports: u64,
    pub space: u64,
    pub owner: String,
}

/// `Transfer` payload: u32 opcode, u64 lamports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferData {
    pub lamports: u64,
}

impl Layout for TransferData {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError> {
        reader.skip(4)?;
        Ok(Self {
            lamports: reader.read_u64()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError> {
        writer.write_u32(TRANSFER).write_u64(self.lamports);
        Ok(())
    }
}

/// `CreateAccountWithSeed` payload. The seed uses a u64 length prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateAccountWithSeedData {
    pub base: String,
    pub seed: String,
    pub lamports: u64,
    pub space: u64,
    pub owner: String,
}

impl Layout for CreateAccountWithSeedData {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError> {
        reader.skip(4)?;
        Ok(Self {
            base: reader.read_pubkey()?,
            seed: reader.read_legacy_string()?,
            lamports: reader.read_u64()?,
            space: reader.read_u64()?,
            owner: reader.read_pubkey()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError> {
        writer.write_u32(CREATE_ACCOUNT_WITH_SEED);
        writer.write_pubkey(&self.base)?;
        writer
            .write_legacy_string(&self.seed)
            .write_u64(self.lamports)
            .write_u64(self.space);
        writer.write_pubkey(&self.owner)?;
        Ok(())
    }
}

pub fn decode(
    tx: &Transaction,
    instruction_index: usize,
    key: DiscKey,
    data: &[u8],
) -> Result<ParsedInstruction, ParserError> {
    let accounts = &tx.instruction(instruction_index)?.accounts;
    let instruction = match key {
        DiscKey::U32(TRANSFER) => {
            let payload = TransferData::decode(data)?;
            SystemInstruction::Transfer(SystemTransfer {
                from_account: optional_account(tx, accounts, 0)?,
                to_account: optional_account(tx, accounts, 1)?,
                lamports: payload.lamports,
            })
        }
        DiscKey::U32(CREATE_ACCOUNT_WITH_SEED) => {
            let payload = CreateAccountWithSeedData::decode(data)?;
            SystemInstruction::CreateAccountWithSeed(CreateAccountWithSeed {
                who: optional_account(tx, accounts, 0)?,
                new_account: optional_account(tx, accounts, 1)?,
                base: payload.base,
                seed: payload.seed,
                lamports: payload.lamports,
                space: payload.space,
                owner: payload.owner,
            })
        }
        other => {
            return Err(ParserError::unknown_discriminator(
                program_names::SYSTEM,
                &other.to_bytes(),
            ))
        }
    };
    Ok(ParsedInstruction::System(instruction))
}

use crate::core::binary_reader::{BinaryReader, BinaryReaderError, BinaryWriter, Layout};
use crate::core::error::ParserError;
use crate::types::Transaction;

use super::constants::EVENT_PREFIX_LEN;

/// Trade event the program logs to itself after every buy or sell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeEventData {
    pub mint: String,
    pub sol_amount: u64,
    pub token_amount: u64,
    pub is_buy: bool,
    pub user: String,
    pub timestamp: i64,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
}

impl Layout for TradeEventData {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError> {
        Ok(Self {
            mint: reader.read_pubkey()?,
            sol_amount: reader.read_u64()?,
            token_amount: reader.read_u64()?,
            is_buy: reader.read_bool()?,
            user: reader.read_pubkey()?,
            timestamp: reader.read_i64()?,
            virtual_sol_reserves: reader.read_u64()?,
            virtual_token_reserves: reader.read_u64()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError> {
        writer.write_pubkey(&self.mint)?;
        writer
            .write_u64(self.sol_amount)
            .write_u64(self.token_amount)
            .write_bool(self.is_buy);
        writer.write_pubkey(&self.user)?;
        writer
            .write_i64(self.timestamp)
            .write_u64(self.virtual_sol_reserves)
            .write_u64(self.virtual_token_reserves);
        Ok(())
    }
}

/// First self-invoked event record nested under top-level instruction `instruction_index`.
pub fn first_trade_event(
    tx: &Transaction,
    instruction_index: usize,
) -> Result<TradeEventData, ParserError> {
    let program_id = tx.program_id_of(tx.instruction(instruction_index)?)?;

    for inner in tx.inner_instructions_for(instruction_index) {
        if tx.program_id_of(inner)? != program_id {
            continue;
        }
        let data = bs58::decode(&inner.data).into_vec()?;
        if data.len() < EVENT_PREFIX_LEN {
            continue;
        }
        return Ok(TradeEventData::decode(&data[EVENT_PREFIX_LEN..])?);
    }

    Err(ParserError::MissingEventData { instruction_index })
}

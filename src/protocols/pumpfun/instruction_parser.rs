use crate::core::binary_reader::{BinaryReader, BinaryReaderError, BinaryWriter, Layout};
use crate::core::constants::{SOL_DECIMALS, WSOL_MINT};
use crate::core::error::ParserError;
use crate::protocols::optional_account;
use crate::types::Transaction;

use super::constants::METHOD_DISCRIMINATOR_LEN;
use super::event_parser::first_trade_event;
use super::{PumpfunCreate, PumpfunTrade};

/// Borsh arguments of the `create` method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateData {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl Layout for CreateData {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError> {
        Ok(Self {
            name: reader.read_string()?,
            symbol: reader.read_string()?,
            uri: reader.read_string()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError> {
        writer
            .write_string(&self.name)
            .write_string(&self.symbol)
            .write_string(&self.uri);
        Ok(())
    }
}

pub fn decode_buy(
    tx: &Transaction,
    instruction_index: usize,
) -> Result<PumpfunTrade, ParserError> {
    let event = first_trade_event(tx, instruction_index)?;
    let to_token_decimals = token_decimals(tx, &event.mint)?;
    Ok(PumpfunTrade {
        who: event.user,
        from_token: WSOL_MINT.to_string(),
        from_token_decimals: SOL_DECIMALS,
        to_token: event.mint,
        to_token_decimals,
        from_token_amount: event.sol_amount,
        to_token_amount: event.token_amount,
    })
}

pub fn decode_sell(
    tx: &Transaction,
    instruction_index: usize,
) -> Result<PumpfunTrade, ParserError> {
    let event = first_trade_event(tx, instruction_index)?;
    let from_token_decimals = token_decimals(tx, &event.mint)?;
    Ok(PumpfunTrade {
        who: event.user,
        from_token: event.mint,
        from_token_decimals,
        to_token: WSOL_MINT.to_string(),
        to_token_decimals: SOL_DECIMALS,
        from_token_amount: event.token_amount,
        to_token_amount: event.sol_amount,
    })
}

pub fn decode_create(
    tx: &Transaction,
    instruction_index: usize,
    data: &[u8],
) -> Result<PumpfunCreate, ParserError> {
    let mut reader = BinaryReader::new(data);
    reader.skip(METHOD_DISCRIMINATOR_LEN)?;
    let args = CreateData::read(&mut reader)?;

    let accounts = &tx.instruction(instruction_index)?.accounts;
    Ok(PumpfunCreate {
        who: optional_account(tx, accounts, 7)?,
        mint: optional_account(tx, accounts, 0)?,
        mint_authority: optional_account(tx, accounts, 1)?,
        bonding_curve: optional_account(tx, accounts, 2)?,
        associated_bonding_curve: optional_account(tx, accounts, 3)?,
        mpl_token_metadata: optional_account(tx, accounts, 5)?,
        metadata: optional_account(tx, accounts, 6)?,
        name: args.name,
        symbol: args.symbol,
        uri: args.uri,
    })
}

/// Decimals of `mint` from the balance snapshots. There is no fallback.
fn token_decimals(tx: &Transaction, mint: &str) -> Result<u8, ParserError> {
    if mint == WSOL_MINT {
        return Ok(SOL_DECIMALS);
    }
    tx.mint_decimals(mint)
        .ok_or_else(|| ParserError::DecimalsNotFound {
            mint: mint.to_string(),
        })
}

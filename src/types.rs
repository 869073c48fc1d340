use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::ParserError;

/// Raw compiled instruction. Used for both top-level and inner instructions.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub program_id_index: usize,
    pub data: String,
    #[serde(default)]
    pub accounts: Vec<usize>,
    #[serde(default)]
    pub stack_height: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressTableLookup {
    pub account_key: String,
    #[serde(default)]
    pub readonly_indexes: Vec<u8>,
    #[serde(default)]
    pub writable_indexes: Vec<u8>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Static account table.
    pub account_keys: Vec<String>,
    pub recent_blockhash: String,
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub address_table_lookups: Vec<AddressTableLookup>,
}

/// Raw token amount plus its UI rendering.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: String,
}

/// Snapshot of a token account balance from transaction meta.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: usize,
    pub mint: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub program_id: Option<String>,
    pub ui_token_amount: UiTokenAmount,
}

/// Nested instructions emitted while executing top-level instruction `index`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InnerInstructions {
    pub index: usize,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub fee: u64,
    #[serde(default)]
    pub pre_balances: Vec<u64>,
    #[serde(default)]
    pub post_balances: Vec<u64>,
    #[serde(default)]
    pub pre_token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub post_token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub inner_instructions: Vec<InnerInstructions>,
    #[serde(default)]
    pub log_messages: Vec<String>,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub compute_units_consumed: Option<u64>,
}

/// Accounts resolved at execution time through address table lookups.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedAddresses {
    #[serde(default)]
    pub writable: Vec<String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

/// Canonical, format-agnostic transaction consumed by the parser.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    pub signatures: Vec<String>,
    pub message: Message,
    pub meta: Meta,
    #[serde(default)]
    pub loaded_addresses: LoadedAddresses,
}

impl Transaction {
    /// Combined account table: static keys, then loaded writable, then loaded readonly.
    pub fn all_accounts(&self) -> impl Iterator<Item = &str> {
        self.message
            .account_keys
            .iter()
            .chain(&self.loaded_addresses.writable)
            .chain(&self.loaded_addresses.readonly)
            .map(String::as_str)
    }

    pub fn account_count(&self) -> usize {
        self.message.account_keys.len()
            + self.loaded_addresses.writable.len()
            + self.loaded_addresses.readonly.len()
    }

    /// Resolves an account index against the combined account table.
    pub fn account_key(&self, index: usize) -> Result<&str, ParserError> {
        let static_len = self.message.account_keys.len();
        let writable_len = self.loaded_addresses.writable.len();
        let key = if index < static_len {
            self.message.account_keys.get(index)
        } else if index < static_len + writable_len {
            self.loaded_addresses.writable.get(index - static_len)
        } else {
            self.loaded_addresses
                .readonly
                .get(index - static_len - writable_len)
        };
        key.map(String::as_str)
            .ok_or(ParserError::AccountIndexOutOfRange {
                index,
                len: self.account_count(),
            })
    }

    pub fn instruction(&self, index: usize) -> Result<&Instruction, ParserError> {
        self.message
            .instructions
            .get(index)
            .ok_or(ParserError::InstructionIndexOutOfRange {
                index,
                len: self.message.instructions.len(),
            })
    }

    pub fn program_id_of(&self, instruction: &Instruction) -> Result<&str, ParserError> {
        self.account_key(instruction.program_id_index)
    }

    /// Nested instructions of the first group produced by top-level instruction `index`.
    pub fn inner_instructions_for(&self, index: usize) -> &[Instruction] {
        self.meta
            .inner_instructions
            .iter()
            .find(|group| group.index == index)
            .map(|group| group.instructions.as_slice())
            .unwrap_or_default()
    }

    /// Pre-token balances followed by post-token balances.
    pub fn token_balances(&self) -> impl Iterator<Item = &TokenBalance> {
        self.meta
            .pre_token_balances
            .iter()
            .chain(&self.meta.post_token_balances)
    }

    pub fn mint_decimals(&self, mint: &str) -> Option<u8> {
        self.token_balances()
            .find(|balance| balance.mint == mint)
            .map(|balance| balance.ui_token_amount.decimals)
    }
}

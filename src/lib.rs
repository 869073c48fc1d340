//! Solana transaction pipeline: normalize raw JSON, decode each top-level
//! instruction with its program's decoder, then resolve one semantic verdict.

pub mod config;
pub mod core;
pub mod protocols;
pub mod resolver;
pub mod types;

use serde_json::Value;

pub use crate::config::ResolveConfig;
pub use crate::core::error::ParserError;
pub use crate::core::normalizer::{canonicalize_account_keys, normalize};
pub use crate::core::platform::{identify_platform, Platform};
pub use crate::core::registry::ProgramRegistry;
pub use crate::protocols::ParsedInstruction;
pub use crate::resolver::{Resolve, TradeType, TransactionResolver};
pub use crate::types::Transaction;

/// Decodes top-level instruction `instruction_index` with the shared registry.
pub fn route_and_decode(
    tx: &Transaction,
    instruction_index: usize,
) -> Result<ParsedInstruction, ParserError> {
    ProgramRegistry::global().route_and_decode(tx, instruction_index)
}

/// One parsed instruction per top-level instruction, in order.
pub fn parse(tx: &Transaction) -> Result<Vec<ParsedInstruction>, ParserError> {
    ProgramRegistry::global().parse(tx)
}

/// Resolves with the default base-token set. Never fails.
pub fn resolve(instructions: &[ParsedInstruction]) -> Resolve {
    TransactionResolver::default().resolve(instructions)
}

/// Raw RPC or Geyser JSON straight to a verdict.
pub fn process(value: &Value) -> Result<Resolve, ParserError> {
    let tx = normalize(value)?;
    let instructions = parse(&tx)?;
    Ok(resolve(&instructions))
}

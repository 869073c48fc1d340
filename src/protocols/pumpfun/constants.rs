use solana_sdk::hash::hash;

use crate::core::constants::program_ids;

pub const PUMP_FUN_PROGRAM_ID: &str = program_ids::PUMP_FUN;

pub const METHOD_DISCRIMINATOR_LEN: usize = 8;
/// Self-invoked event records: 8-byte CPI tag, then the 8-byte event discriminator.
pub const EVENT_PREFIX_LEN: usize = 16;

/// Anchor method discriminator: `sha256("global:<method>")[..8]`.
pub fn sighash(method: &str) -> [u8; METHOD_DISCRIMINATOR_LEN] {
    let digest = hash(format!("global:{method}").as_bytes()).to_bytes();
    let mut discriminator = [0u8; METHOD_DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&digest[..METHOD_DISCRIMINATOR_LEN]);
    discriminator
}

/// Method discriminators, derived once from their method names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpfunDiscriminators {
    pub create: [u8; METHOD_DISCRIMINATOR_LEN],
    pub buy: [u8; METHOD_DISCRIMINATOR_LEN],
    pub sell: [u8; METHOD_DISCRIMINATOR_LEN],
}

impl PumpfunDiscriminators {
    pub fn new() -> Self {
        Self {
            create: sighash("create"),
            buy: sighash("buy"),
            sell: sighash("sell"),
        }
    }
}

impl Default for PumpfunDiscriminators {
    fn default() -> Self {
        Self::new()
    }
}

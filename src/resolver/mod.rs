pub mod pumpfun;
pub mod raydium;
pub mod unknown;

use serde::Serialize;

use crate::config::ResolveConfig;
use crate::protocols::ParsedInstruction;

pub use pumpfun::{PumpfunResolve, PumpfunResolver};
pub use raydium::{RaydiumResolve, RaydiumResolver};
pub use unknown::UnknownResolver;

/// Semantic verdict for one transaction.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "resolver")]
pub enum Resolve {
    Pumpfun(PumpfunResolve),
    Raydium(RaydiumResolve),
    Unknown,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum TradeType {
    Buy,
    Sell,
    Swap,
}

/// One semantic pattern over a parsed instruction list.
pub trait Resolver: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means the pattern did not match and the next resolver is tried.
    fn resolve(
        &self,
        instructions: &[ParsedInstruction],
        config: &ResolveConfig,
    ) -> Option<Resolve>;
}

/// Ordered resolver chain. The first match wins and `Unknown` closes the chain.
pub struct TransactionResolver {
    config: ResolveConfig,
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Default for TransactionResolver {
    fn default() -> Self {
        Self::new(ResolveConfig::default())
    }
}

impl TransactionResolver {
    pub fn new(config: ResolveConfig) -> Self {
        Self {
            config,
            resolvers: vec![Box::new(PumpfunResolver), Box::new(RaydiumResolver)],
        }
    }

    pub fn resolve(&self, instructions: &[ParsedInstruction]) -> Resolve {
        for resolver in &self.resolvers {
            if let Some(verdict) = resolver.resolve(instructions, &self.config) {
                tracing::debug!(resolver = resolver.name(), "resolver matched");
                return verdict;
            }
        }
        UnknownResolver.resolve(instructions, &self.config).unwrap_or(Resolve::Unknown)
    }
}

/// Output in the base set is a sell, input in the base set is a buy, anything else a swap.
pub fn classify_trade_type(config: &ResolveConfig, from_token: &str, to_token: &str) -> TradeType {
    if config.is_base_token(to_token) {
        TradeType::Sell
    } else if config.is_base_token(from_token) {
        TradeType::Buy
    } else {
        TradeType::Swap
    }
}

/// Raw amount to decimal-scaled amount through a table of powers of ten.
#[inline]
pub fn convert_to_ui_amount(amount: u64, decimals: u8) -> f64 {
    if decimals == 0 {
        return amount as f64;
    }

    const POW10: [f64; 20] = [
        1.0,
        10.0,
        100.0,
        1_000.0,
        10_000.0,
        100_000.0,
        1_000_000.0,
        10_000_000.0,
        100_000_000.0,
        1_000_000_000.0,
        10_000_000_000.0,
        100_000_000_000.0,
        1_000_000_000_000.0,
        10_000_000_000_000.0,
        100_000_000_000_000.0,
        1_000_000_000_000_000.0,
        10_000_000_000_000_000.0,
        100_000_000_000_000_000.0,
        1_000_000_000_000_000_000.0,
        10_000_000_000_000_000_000.0,
    ];

    let scale = POW10
        .get(decimals as usize)
        .copied()
        .unwrap_or_else(|| 10f64.powi(i32::from(decimals)));
    amount as f64 / scale
}

/// Exactly one candidate, or nothing. Multiple candidates are logged and rejected.
pub(crate) fn single_match<'a, T>(
    resolver: &'static str,
    candidates: Vec<&'a T>,
) -> Option<&'a T> {
    match candidates.as_slice() {
        [only] => Some(*only),
        [] => None,
        many => {
            tracing::debug!(
                resolver,
                matches = many.len(),
                "ambiguous match, skipping resolver"
            );
            None
        }
    }
}

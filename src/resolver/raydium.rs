use serde::Serialize;

use crate::config::ResolveConfig;
use crate::protocols::raydium::{RaydiumInstruction, RaydiumSwap};
use crate::protocols::ParsedInstruction;

use super::{classify_trade_type, convert_to_ui_amount, single_match, Resolve, Resolver, TradeType};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RaydiumResolve {
    pub trade_type: TradeType,
    pub who: String,
    pub from_token: String,
    pub from_amount: f64,
    pub to_token: String,
    pub to_amount: f64,
    /// Scaled by the destination token's decimals.
    pub minimum_amount_out: f64,
}

pub struct RaydiumResolver;

impl Resolver for RaydiumResolver {
    fn name(&self) -> &'static str {
        "raydium"
    }

    fn resolve(
        &self,
        instructions: &[ParsedInstruction],
        config: &ResolveConfig,
    ) -> Option<Resolve> {
        let swaps: Vec<&RaydiumSwap> = instructions
            .iter()
            .filter_map(|instruction| match instruction {
                ParsedInstruction::RaydiumAmm(RaydiumInstruction::Swap(swap)) => Some(swap),
                _ => None,
            })
            .collect();

        let swap = single_match(self.name(), swaps)?;
        Some(Resolve::Raydium(RaydiumResolve {
            trade_type: classify_trade_type(config, &swap.from_token, &swap.to_token),
            who: swap.who.clone(),
            from_token: swap.from_token.clone(),
            from_amount: convert_to_ui_amount(swap.from_token_amount, swap.from_token_decimals),
            to_token: swap.to_token.clone(),
            to_amount: convert_to_ui_amount(swap.to_token_amount, swap.to_token_decimals),
            minimum_amount_out: convert_to_ui_amount(
                swap.minimum_amount_out,
                swap.to_token_decimals,
            ),
        }))
    }
}

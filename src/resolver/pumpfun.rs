use serde::Serialize;

use crate::config::ResolveConfig;
use crate::protocols::pumpfun::{PumpfunInstruction, PumpfunTrade};
use crate::protocols::ParsedInstruction;

use super::{classify_trade_type, convert_to_ui_amount, single_match, Resolve, Resolver, TradeType};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PumpfunResolve {
    /// `Buy` or `Sell`, as named by the decoded instruction.
    pub instruction: &'static str,
    pub trade_type: TradeType,
    pub who: String,
    pub from_token: String,
    pub from_amount: f64,
    pub to_token: String,
    pub to_amount: f64,
}

/// Matches a transaction carrying exactly one bonding-curve buy or sell.
pub struct PumpfunResolver;

impl Resolver for PumpfunResolver {
    fn name(&self) -> &'static str {
        "pumpfun"
    }

    fn resolve(
        &self,
        instructions: &[ParsedInstruction],
        config: &ResolveConfig,
    ) -> Option<Resolve> {
        let trades: Vec<&PumpfunInstruction> = instructions
            .iter()
            .filter_map(|instruction| match instruction {
                ParsedInstruction::Pumpfun(
                    ix @ (PumpfunInstruction::Buy(_) | PumpfunInstruction::Sell(_)),
                ) => Some(ix),
                _ => None,
            })
            .collect();

        let instruction = single_match(self.name(), trades)?;
        let trade: &PumpfunTrade = match instruction {
            PumpfunInstruction::Buy(trade) | PumpfunInstruction::Sell(trade) => trade,
            PumpfunInstruction::Create(_) => return None,
        };

        Some(Resolve::Pumpfun(PumpfunResolve {
            instruction: instruction.name(),
            trade_type: classify_trade_type(config, &trade.from_token, &trade.to_token),
            who: trade.who.clone(),
            from_token: trade.from_token.clone(),
            from_amount: convert_to_ui_amount(trade.from_token_amount, trade.from_token_decimals),
            to_token: trade.to_token.clone(),
            to_amount: convert_to_ui_amount(trade.to_token_amount, trade.to_token_decimals),
        }))
    }
}

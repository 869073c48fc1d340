#![allow(dead_code)]

use serde_json::{json, Value};

use solana_tx_resolver::core::binary_reader::{BinaryWriter, Layout};
use solana_tx_resolver::core::constants::{program_ids, WSOL_MINT};
use solana_tx_resolver::protocols::pumpfun::event_parser::TradeEventData;
use solana_tx_resolver::protocols::pumpfun::sighash;
use solana_tx_resolver::protocols::raydium::SwapData;
use solana_tx_resolver::types::{
    InnerInstructions, Instruction, TokenBalance, Transaction, UiTokenAmount,
};

pub const SIGNATURE: &str =
    "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb3Ld6x2ckRbHjtJtGK9NZXuw7EJxdxjhzPtaRQFKT8Xy2";
pub const BLOCKHASH: &str = "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N";
pub const JUPITER: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";

/// Deterministic 32-byte key. `key(0)` would be the system program, so callers start at 1.
pub fn key(seed: u8) -> String {
    bs58::encode([seed; 32]).into_string()
}

pub fn approx_eq(actual: f64, expected: f64) {
    let diff = (actual - expected).abs();
    assert!(diff < 1e-9, "expected {expected}, got {actual}");
}

/// Assembles canonical transactions directly, bypassing the normalizer.
pub struct TxBuilder {
    tx: Transaction,
}

impl TxBuilder {
    pub fn new(account_keys: &[&str]) -> Self {
        let mut tx = Transaction {
            slot: 250_000_000,
            block_time: Some(1_700_000_000),
            signatures: vec![SIGNATURE.to_string()],
            ..Transaction::default()
        };
        tx.message.account_keys = account_keys.iter().map(|key| key.to_string()).collect();
        tx.message.recent_blockhash = BLOCKHASH.to_string();
        Self { tx }
    }

    pub fn instruction(mut self, program_id_index: usize, accounts: &[usize], data: &[u8]) -> Self {
        self.tx
            .message
            .instructions
            .push(raw_instruction(program_id_index, accounts, data, None));
        self
    }

    /// Appends a nested instruction to the group of top-level instruction `index`.
    pub fn inner(
        mut self,
        index: usize,
        program_id_index: usize,
        accounts: &[usize],
        data: &[u8],
    ) -> Self {
        let instruction = raw_instruction(program_id_index, accounts, data, Some(2));
        match self
            .tx
            .meta
            .inner_instructions
            .iter_mut()
            .find(|group| group.index == index)
        {
            Some(group) => group.instructions.push(instruction),
            None => self.tx.meta.inner_instructions.push(InnerInstructions {
                index,
                instructions: vec![instruction],
            }),
        }
        self
    }

    pub fn pre_token_balance(mut self, account_index: usize, mint: &str, decimals: u8) -> Self {
        self.tx
            .meta
            .pre_token_balances
            .push(token_balance(account_index, mint, decimals));
        self
    }

    pub fn post_token_balance(mut self, account_index: usize, mint: &str, decimals: u8) -> Self {
        self.tx
            .meta
            .post_token_balances
            .push(token_balance(account_index, mint, decimals));
        self
    }

    pub fn loaded(mut self, writable: &[&str], readonly: &[&str]) -> Self {
        self.tx.loaded_addresses.writable = writable.iter().map(|key| key.to_string()).collect();
        self.tx.loaded_addresses.readonly = readonly.iter().map(|key| key.to_string()).collect();
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

fn raw_instruction(
    program_id_index: usize,
    accounts: &[usize],
    data: &[u8],
    stack_height: Option<u32>,
) -> Instruction {
    Instruction {
        program_id_index,
        data: bs58::encode(data).into_string(),
        accounts: accounts.to_vec(),
        stack_height,
    }
}

fn token_balance(account_index: usize, mint: &str, decimals: u8) -> TokenBalance {
    TokenBalance {
        account_index,
        mint: mint.to_string(),
        owner: None,
        program_id: Some(program_ids::TOKEN.to_string()),
        ui_token_amount: UiTokenAmount {
            amount: "0".to_string(),
            decimals,
            ui_amount: None,
            ui_amount_string: "0".to_string(),
        },
    }
}

pub fn compute_unit_limit(limit: u32) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_u8(2).write_u32(limit);
    writer.into_inner()
}

pub fn compute_unit_price(micro_lamports: u64) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_u8(3).write_u64(micro_lamports);
    writer.into_inner()
}

pub fn token_transfer(amount: u64) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_u8(3).write_u64(amount);
    writer.into_inner()
}

pub fn token_transfer_checked(amount: u64, decimals: u8) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_u8(12).write_u64(amount).write_u8(decimals);
    writer.into_inner()
}

pub fn raydium_swap(amount_in: u64, minimum_amount_out: u64) -> Vec<u8> {
    SwapData {
        amount_in,
        minimum_amount_out,
    }
    .encode()
    .expect("swap payload")
}

/// `buy`/`sell` call data: discriminator, token amount, SOL limit.
pub fn pumpfun_trade_call(method: &str, amount: u64, sol_limit: u64) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer
        .write_bytes(&sighash(method))
        .write_u64(amount)
        .write_u64(sol_limit);
    writer.into_inner()
}

pub fn pumpfun_create_call(name: &str, symbol: &str, uri: &str) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer
        .write_bytes(&sighash("create"))
        .write_string(name)
        .write_string(symbol)
        .write_string(uri);
    writer.into_inner()
}

/// Self-invoked trade event record: CPI tag, event discriminator, then the event body.
pub fn pumpfun_trade_event(
    mint: &str,
    sol_amount: u64,
    token_amount: u64,
    is_buy: bool,
    user: &str,
) -> Vec<u8> {
    let event = TradeEventData {
        mint: mint.to_string(),
        sol_amount,
        token_amount,
        is_buy,
        user: user.to_string(),
        timestamp: 1_700_000_000,
        virtual_sol_reserves: 30_000_000_000,
        virtual_token_reserves: 1_073_000_000_000_000,
    };
    let mut data = vec![0xe4, 0x45, 0xa5, 0x2e, 0x51, 0xcb, 0x9a, 0x1d];
    data.extend_from_slice(&[0xbd, 0xdb, 0x7f, 0xd3, 0x4e, 0xe6, 0x61, 0xee]);
    data.extend(event.encode().expect("trade event payload"));
    data
}

/// Bonding-curve trade fixture: user 0, mint 1, curve 2, program 3.
pub fn pumpfun_trade_tx(
    method: &str,
    sol_amount: u64,
    token_amount: u64,
    mint_decimals: Option<u8>,
) -> Transaction {
    let user = key(1);
    let mint = key(2);
    let curve = key(3);
    let keys = [user.as_str(), mint.as_str(), curve.as_str(), program_ids::PUMP_FUN];
    let mut builder = TxBuilder::new(&keys)
        .instruction(3, &[2, 1, 0], &pumpfun_trade_call(method, token_amount, sol_amount))
        .inner(
            0,
            3,
            &[],
            &pumpfun_trade_event(&mint, sol_amount, token_amount, method == "buy", &user),
        );
    if let Some(decimals) = mint_decimals {
        builder = builder.post_token_balance(2, &mint, decimals);
    }
    builder.build()
}

/// AMM swap fixture. Accounts: signer 0, source 1, destination 2, pool 3,
/// vault 4, AMM program 5, token program 6. Source holds WSOL, destination `key(9)` mint.
pub fn raydium_swap_builder(amount_in: u64, minimum_amount_out: u64) -> TxBuilder {
    let keys = [
        key(1),
        key(4),
        key(5),
        key(6),
        key(7),
        program_ids::RAYDIUM_AMM.to_string(),
        program_ids::TOKEN.to_string(),
    ];
    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    TxBuilder::new(&keys)
        .instruction(5, &[6, 3, 4, 1, 2, 0], &raydium_swap(amount_in, minimum_amount_out))
        .pre_token_balance(1, WSOL_MINT, 9)
        .pre_token_balance(2, &key(9), 6)
}

pub fn rpc_envelope(message: Value, meta: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "slot": 250_000_000u64,
            "blockTime": 1_700_000_000i64,
            "transaction": {
                "signatures": [SIGNATURE],
                "message": message,
            },
            "meta": meta,
        }
    })
}

pub fn geyser_envelope(message: Value, meta: Value) -> Value {
    json!({
        "filters": ["pumpfun"],
        "transaction": {
            "slot": 250_000_000u64,
            "transaction": {
                "signature": SIGNATURE,
                "isVote": false,
                "transaction": {
                    "signatures": [SIGNATURE],
                    "message": message,
                },
                "meta": meta,
                "index": 12,
            }
        }
    })
}

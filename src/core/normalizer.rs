//! Reduces the two supported transaction envelopes (JSON-RPC `getTransaction`
//! responses and Geyser stream payloads) to one canonical [`Transaction`].

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::core::constants::{NON_CANONICAL_SYSTEM_PROGRAM, NATIVE_SOL};
use crate::core::error::ParserError;
use crate::types::{InnerInstructions, LoadedAddresses, Message, Meta, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    Rpc,
    Geyser,
}

impl Envelope {
    pub fn detect(value: &Value) -> Option<Self> {
        if value.get("jsonrpc").is_some() && value.get("result").is_some() {
            Some(Self::Rpc)
        } else if value
            .get("transaction")
            .and_then(|container| container.get("transaction"))
            .is_some()
        {
            Some(Self::Geyser)
        } else {
            None
        }
    }

    fn default_status(self) -> Value {
        match self {
            Self::Rpc => json!({}),
            Self::Geyser => json!({ "Ok": null }),
        }
    }
}

/// Normalizes either supported envelope into a [`Transaction`].
pub fn normalize(value: &Value) -> Result<Transaction, ParserError> {
    match Envelope::detect(value) {
        Some(Envelope::Rpc) => normalize_rpc(value),
        Some(Envelope::Geyser) => normalize_geyser(value),
        None => Err(ParserError::UnrecognizedShape),
    }
}

fn normalize_rpc(value: &Value) -> Result<Transaction, ParserError> {
    let result = required(value, "result", "result")?;
    let slot = deserialize(required(result, "slot", "result.slot")?)?;
    let block_time = optional::<Option<i64>>(result, "blockTime")?;
    let transaction = required(result, "transaction", "result.transaction")?;
    let meta = required(result, "meta", "result.meta")?;

    let loaded = meta.get("loadedAddresses");
    let loaded_addresses = LoadedAddresses {
        writable: loaded
            .map(|addresses| optional(addresses, "writable"))
            .transpose()?
            .unwrap_or_default(),
        readonly: loaded
            .map(|addresses| optional(addresses, "readonly"))
            .transpose()?
            .unwrap_or_default(),
    };

    Ok(Transaction {
        slot,
        block_time,
        signatures: deserialize(required(
            transaction,
            "signatures",
            "result.transaction.signatures",
        )?)?,
        message: build_message(
            required(transaction, "message", "result.transaction.message")?,
            "result.transaction.message",
        )?,
        meta: build_meta(meta, "result.meta", Envelope::Rpc)?,
        loaded_addresses,
    })
}

fn normalize_geyser(value: &Value) -> Result<Transaction, ParserError> {
    let container = required(value, "transaction", "transaction")?;
    let slot = deserialize(required(container, "slot", "transaction.slot")?)?;
    let geyser_txn = required(container, "transaction", "transaction.transaction")?;
    let meta = required(geyser_txn, "meta", "transaction.transaction.meta")?;
    let real_txn = required(
        geyser_txn,
        "transaction",
        "transaction.transaction.transaction",
    )?;

    let loaded_addresses = LoadedAddresses {
        writable: optional(meta, "loadedWritableAddresses")?,
        readonly: optional(meta, "loadedReadonlyAddresses")?,
    };

    Ok(Transaction {
        slot,
        // Geyser payloads carry no block time.
        block_time: None,
        signatures: deserialize(required(
            real_txn,
            "signatures",
            "transaction.transaction.transaction.signatures",
        )?)?,
        message: build_message(
            required(real_txn, "message", "transaction.transaction.transaction.message")?,
            "transaction.transaction.transaction.message",
        )?,
        meta: build_meta(meta, "transaction.transaction.meta", Envelope::Geyser)?,
        loaded_addresses,
    })
}

fn build_message(message: &Value, path: &str) -> Result<Message, ParserError> {
    let account_keys: Vec<String> = deserialize(required(
        message,
        "accountKeys",
        &format!("{path}.accountKeys"),
    )?)?;
    Ok(Message {
        account_keys: canonicalize_account_keys(account_keys),
        recent_blockhash: deserialize(required(
            message,
            "recentBlockhash",
            &format!("{path}.recentBlockhash"),
        )?)?,
        instructions: records(
            required(message, "instructions", &format!("{path}.instructions"))?,
            &format!("{path}.instructions"),
            INSTRUCTION_KEYS,
        )?,
        address_table_lookups: optional_records(
            message,
            "addressTableLookups",
            path,
            &["accountKey"],
        )?,
    })
}

fn build_meta(meta: &Value, path: &str, envelope: Envelope) -> Result<Meta, ParserError> {
    let status = match meta.get("status") {
        Some(status) if !status.is_null() => status.clone(),
        _ => envelope.default_status(),
    };
    Ok(Meta {
        fee: optional(meta, "fee")?,
        pre_balances: optional(meta, "preBalances")?,
        post_balances: optional(meta, "postBalances")?,
        pre_token_balances: optional_records(
            meta,
            "preTokenBalances",
            path,
            TOKEN_BALANCE_KEYS,
        )?,
        post_token_balances: optional_records(
            meta,
            "postTokenBalances",
            path,
            TOKEN_BALANCE_KEYS,
        )?,
        inner_instructions: inner_instruction_groups(meta, path)?,
        log_messages: optional(meta, "logMessages")?,
        err: meta.get("err").filter(|err| !err.is_null()).cloned(),
        status,
        compute_units_consumed: optional(meta, "computeUnitsConsumed")?,
    })
}

/// Rewrites the one-character-longer system program placeholder to the canonical id.
pub fn canonicalize_account_keys(keys: Vec<String>) -> Vec<String> {
    keys.into_iter()
        .map(|key| {
            if key == NON_CANONICAL_SYSTEM_PROGRAM {
                NATIVE_SOL.to_string()
            } else {
                key
            }
        })
        .collect()
}

/// Present and non-null, or `MissingRequiredField` naming `path`.
fn required<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value, ParserError> {
    value
        .get(key)
        .filter(|field| !field.is_null())
        .ok_or_else(|| ParserError::missing_field(path))
}

const INSTRUCTION_KEYS: &[&str] = &["programIdIndex", "data"];
const TOKEN_BALANCE_KEYS: &[&str] = &[
    "accountIndex",
    "mint",
    "uiTokenAmount",
    "uiTokenAmount.amount",
    "uiTokenAmount.decimals",
];

/// Deserializes a list of records after checking each one carries `keys`.
fn records<T: DeserializeOwned>(
    list: &Value,
    path: &str,
    keys: &[&str],
) -> Result<Vec<T>, ParserError> {
    check_records(list, path, keys)?;
    deserialize(list)
}

/// Keys may be dotted to reach into a nested object. A missing key is reported
/// as `{path}[{i}].{key}`.
fn check_records(list: &Value, path: &str, keys: &[&str]) -> Result<(), ParserError> {
    let Some(items) = list.as_array() else {
        return Ok(());
    };
    for (i, item) in items.iter().enumerate() {
        for key in keys {
            let field_path = format!("{path}[{i}].{key}");
            key.split('.')
                .try_fold(item, |node, segment| required(node, segment, &field_path))?;
        }
    }
    Ok(())
}

/// Like [`records`], but a missing or null list is empty.
fn optional_records<T: DeserializeOwned>(
    value: &Value,
    key: &str,
    path: &str,
    keys: &[&str],
) -> Result<Vec<T>, ParserError> {
    match value.get(key) {
        Some(list) if !list.is_null() => records(list, &format!("{path}.{key}"), keys),
        _ => Ok(Vec::new()),
    }
}

fn inner_instruction_groups(
    meta: &Value,
    path: &str,
) -> Result<Vec<InnerInstructions>, ParserError> {
    let path = format!("{path}.innerInstructions");
    if let Some(groups) = meta.get("innerInstructions").and_then(Value::as_array) {
        for (i, group) in groups.iter().enumerate() {
            required(group, "index", &format!("{path}[{i}].index"))?;
            if let Some(instructions) = group.get("instructions") {
                check_records(
                    instructions,
                    &format!("{path}[{i}].instructions"),
                    INSTRUCTION_KEYS,
                )?;
            }
        }
    }
    optional(meta, "innerInstructions")
}

/// Missing or null keys fall back to the type's default.
fn optional<T>(value: &Value, key: &str) -> Result<T, ParserError>
where
    T: DeserializeOwned + Default,
{
    match value.get(key) {
        Some(field) if !field.is_null() => deserialize(field),
        _ => Ok(T::default()),
    }
}

fn deserialize<T: DeserializeOwned>(value: &Value) -> Result<T, ParserError> {
    T::deserialize(value).map_err(ParserError::from)
}

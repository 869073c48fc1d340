use serde::Serialize;

use crate::types::Transaction;

/// Known trading front-ends, keyed by a fee or router account they always touch.
pub const PLATFORMS: &[(&str, &str)] = &[
    ("tro46jTMkb56A3wPepo5HT7JcvX9wFWvR8VaJzgdjEf", "Trojan"),
    ("9RYJ3qr5eU5xAooqVcbmdeusjcViL5Nkiq7Gske3tiKq", "BullX"),
    ("AVUCZyuT35YSuj4RH7fwiyPu82Djn2Hfg7y2ND2XcnZH", "Photon"),
];

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Platform {
    pub address: String,
    pub name: &'static str,
}

/// First known platform account found in the combined account table.
pub fn identify_platform(tx: &Transaction) -> Option<Platform> {
    tx.all_accounts().find_map(|address| {
        PLATFORMS
            .iter()
            .find(|(known, _)| *known == address)
            .map(|&(known, name)| Platform {
                address: known.to_string(),
                name,
            })
    })
}

use serde::{Deserialize, Serialize};

use crate::core::constants::{NATIVE_SOL, WSOL_MINT};

/// Settings for the resolution stage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConfig {
    /// Quote-side tokens. A trade paying out one of these is a sell, one paying in is a buy.
    #[serde(default = "ResolveConfig::default_base_tokens")]
    pub base_tokens: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            base_tokens: Self::default_base_tokens(),
        }
    }
}

impl ResolveConfig {
    fn default_base_tokens() -> Vec<String> {
        vec![NATIVE_SOL.to_string(), WSOL_MINT.to_string()]
    }

    pub fn is_base_token(&self, mint: &str) -> bool {
        self.base_tokens.iter().any(|token| token == mint)
    }
}

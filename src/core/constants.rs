pub mod program_ids {
    pub const SYSTEM: &str = "11111111111111111111111111111111";
    pub const COMPUTE_BUDGET: &str = "ComputeBudget111111111111111111111111111111";
    pub const TOKEN: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
    pub const RAYDIUM_AMM: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";
    pub const PUMP_FUN: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
}

pub mod program_names {
    pub const SYSTEM: &str = "System Program";
    pub const COMPUTE_BUDGET: &str = "ComputeBudget";
    pub const TOKEN: &str = "TokenProgram";
    pub const RAYDIUM_AMM: &str = "RaydiumAMM";
    pub const PUMP_FUN: &str = "PumpFun";
    pub const UNKNOWN: &str = "Unknown";
}

pub mod instruction_names {
    pub const UNKNOWN: &str = "Unknown";
    pub const TRANSFER: &str = "Transfer";
    pub const CREATE_ACCOUNT_WITH_SEED: &str = "CreateAccountWithSeed";
    pub const SET_COMPUTE_UNIT_LIMIT: &str = "SetComputeUnitLimit";
    pub const SET_COMPUTE_UNIT_PRICE: &str = "SetComputeUnitPrice";
    pub const INITIALIZE_ACCOUNT: &str = "InitializeAccount";
    pub const TRANSFER_CHECKED: &str = "TransferChecked";
    pub const SWAP: &str = "Swap";
    pub const CREATE: &str = "Create";
    pub const BUY: &str = "Buy";
    pub const SELL: &str = "Sell";
}

/// Wrapped SOL mint.
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
/// Native SOL is identified by the system program id.
pub const NATIVE_SOL: &str = program_ids::SYSTEM;
pub const SOL_DECIMALS: u8 = spl_token::native_mint::DECIMALS;

/// Some encoders emit the system program id with one extra "1".
pub const NON_CANONICAL_SYSTEM_PROGRAM: &str = "111111111111111111111111111111111";

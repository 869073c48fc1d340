use thiserror::Error;

use super::binary_reader::BinaryReaderError;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("unrecognized Solana transaction format")]
    UnrecognizedShape,
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },
    #[error("layout decode failed: {0}")]
    Layout(#[from] BinaryReaderError),
    #[error("instruction data is not valid base58: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),
    #[error("unknown {program} discriminator: {discriminator}")]
    UnknownDiscriminator {
        program: &'static str,
        discriminator: String,
    },
    #[error("instruction index {index} out of range ({len} instructions)")]
    InstructionIndexOutOfRange { index: usize, len: usize },
    #[error("account index {index} out of range ({len} accounts)")]
    AccountIndexOutOfRange { index: usize, len: usize },
    #[error("{instruction} is missing account at position {position}")]
    MissingAccount {
        instruction: &'static str,
        position: usize,
    },
    #[error("no event data found for instruction {instruction_index}")]
    MissingEventData { instruction_index: usize },
    #[error("could not find decimals for mint {mint}")]
    DecimalsNotFound { mint: String },
    #[error("failed to deserialize value: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParserError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    pub fn unknown_discriminator(program: &'static str, discriminator: &[u8]) -> Self {
        Self::UnknownDiscriminator {
            program,
            discriminator: hex::encode(discriminator),
        }
    }

    pub fn missing_account(instruction: &'static str, position: usize) -> Self {
        Self::MissingAccount {
            instruction,
            position,
        }
    }

    /// True when a layout read ran past the end of its buffer.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Layout(BinaryReaderError::Truncated { .. }))
    }
}

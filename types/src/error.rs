//! Errors raised while parsing, formatting or validating entity ids.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityIdError {
    #[error("invalid entity id {0:?}: format should look like 0.0.123 or 0.0.123-vfmkw")]
    InvalidEntityId(String),

    #[error("solidity addresses must be 20 bytes or 40 hex chars, got {0}")]
    InvalidAddressLength(usize),

    #[error("shard {0} does not fit in 32 bits")]
    ShardOutOfRange(u64),

    #[error("cannot compute or validate a checksum without knowing which network the id is for")]
    MissingNetworkContext,

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("invalid ledger id: {0}")]
    InvalidLedgerId(String),
}

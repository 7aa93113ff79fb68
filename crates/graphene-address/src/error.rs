use thiserror::Error;

use crate::generation::Generation;

/// Address encoding and decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("malformed address text: {0}")]
    MalformedText(String),

    #[error("wrong key data length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#010x}, found {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("invalid public key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("address generation mismatch: expected {expected}, found {found}")]
    GenerationMismatch {
        expected: Generation,
        found: Generation,
    },
}

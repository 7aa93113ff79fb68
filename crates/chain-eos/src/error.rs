use graphene_address::AddressError;
use graphene_codec::CodecError;
use thiserror::Error;

/// EOSIO transaction layer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EosError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("invalid reference block: {0}")]
    InvalidReferenceBlock(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("serialization overflow: {what} is {len} bytes, limit is {max}")]
    SerializationOverflow {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("address error: {0}")]
    Address(#[from] AddressError),
}

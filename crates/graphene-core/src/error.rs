use chain_eos::EosError;
use graphene_address::AddressError;
use thiserror::Error;

use crate::types::Chain;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("address belongs to {found}, not {expected}")]
    WrongChain { expected: Chain, found: Chain },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("eos error: {0}")]
    Eos(#[from] EosError),
}

//! EOSIO transaction model and packed-transaction envelope.
//!
//! This crate turns a list of actions into the exact bytes a node hashes and
//! executes. Nothing here talks to the network or holds private keys: the
//! signing digest goes out, signatures come back in, and the packed envelope
//! goes out again.
//!
//! ```text
//! Transaction (signed body):
//!   expiration              u32
//!   ref_block_num           u16
//!   ref_block_prefix        u32
//!   max_net_usage_words     varint
//!   max_cpu_usage_ms        u8
//!   delay_sec               varint
//!   context_free_actions    sequence<Action>
//!   actions                 sequence<Action>
//!   transaction_extensions  sequence<Extension>
//!
//! PackedTransaction (broadcast):
//!   signatures              sequence<Signature>
//!   compression             u8
//!   packed_context_free_data  bytes
//!   packed_trx              bytes
//! ```

pub mod action;
pub mod asset;
pub mod chains;
pub mod error;
mod hex_serde;
pub mod name;
pub mod packed;
pub mod signature;
pub mod transaction;

pub use action::{build_transfer, Action, PermissionLevel, Transfer, MAX_MEMO_LEN};
pub use asset::{Asset, Symbol};
pub use chains::{
    chain_by_id, parse_chain_id, supported_chains, EosChain, EOS_MAINNET, JUNGLE_TESTNET, TELOS,
    WAX,
};
pub use error::EosError;
pub use name::Name;
pub use packed::{
    pack_context_free_data, unpack_context_free_data, CompressionType, PackedTransaction,
    MAX_CONTEXT_FREE_DATA,
};
pub use signature::{Signature, SIGNATURE_SIZE};
pub use transaction::{
    Extension, Transaction, TransactionHeader, DEFAULT_EXPIRY_SECONDS, MAX_NET_USAGE_WORDS,
};

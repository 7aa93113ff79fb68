//! Entry points for hosts that work with graphene-family chains by name.
//!
//! The chain crates do the real work; this crate picks the right address
//! profile for a [`Chain`] and turns JSON pack requests into packed
//! transactions, reporting every failure as a value.

pub mod address;
pub mod error;
pub mod packing;
pub mod types;

pub use address::{derive_address, validate_address};
pub use error::CoreError;
pub use graphene_address::Generation;
pub use packing::{
    build_transaction, pack_transaction, pack_transaction_json, PackRequest, PackResult,
    TransferRequest,
};
pub use types::Chain;

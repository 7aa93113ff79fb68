//! Bitshares value types.
//!
//! Bitshares shares the graphene address scheme (`BTS` prefix) and the
//! canonical codec with the other chains in this workspace. What it adds is
//! its object-id addressing, which shows up in every asset amount:
//!
//! ```text
//! Asset:
//!   amount     i64 (LE)
//!   asset_id   varint (instance of object 1.3.x)
//! ```

pub mod asset;
pub mod error;
pub mod object_id;

pub use asset::Asset;
pub use error::BtsError;
pub use object_id::{ObjectId, ASSET_OBJECT_SPACE, ASSET_OBJECT_TYPE};

/// Bitshares account key address (`BTS...` / `PUB_K1_...`).
pub type Address = graphene_address::BitsharesAddress;

//! Public-key addresses for graphene-family chains (EOSIO, Steem, Bitshares).
//!
//! An address is a 33-byte compressed public key followed by a 4-byte
//! checksum, base58-encoded behind a textual prefix:
//!
//! ```text
//! EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV        legacy
//! PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63    modern, secp256k1
//! PUB_R1_...                                                  modern, secp256r1
//! ```
//!
//! The checksum is the first four bytes of `RIPEMD-160(key || separator)`,
//! where the separator is empty for legacy addresses and `"K1"` / `"R1"`
//! for the modern generations. The same key therefore renders with a
//! different checksum in each generation.
//!
//! Which prefixes a chain uses is described by a [`ChainProfile`]; the
//! address type is generic over it so an EOS address can never be mixed up
//! with a Steem address at compile time.

pub mod address;
pub mod checksum;
pub mod error;
pub mod generation;
pub mod key;
pub mod profile;

pub use address::{Address, BitsharesAddress, EosAddress, SteemAddress};
pub use checksum::checksum;
pub use error::AddressError;
pub use generation::{Curve, Generation};
pub use key::{PublicKeyBytes, CHECKSUM_SIZE, KEY_DATA_SIZE, MAX_BASE58_LEN, PUBLIC_KEY_SIZE};
pub use profile::{Bitshares, ChainProfile, Eos, Steem};

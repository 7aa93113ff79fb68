//! Canonical binary codec shared by the graphene-family chains.
//!
//! Every value that ends up hashed for signing goes through this crate, so
//! the byte layout here is part of the consensus wire format:
//!
//! ```text
//! u8 / u16 / u32 / u64 / i64   fixed width, little-endian
//! [u8; N]                      raw bytes, no length prefix
//! varint                       LEB128: 7 payload bits per byte, high bit = more
//! sequence<T>                  varint(count) || T || T || ...
//! bytes / string               varint(len)   || raw bytes
//! ```
//!
//! Decoding is provided for round-trips and for parsing packed envelopes;
//! signing only ever needs the encode half.

pub mod decode;
pub mod encode;
pub mod error;
pub mod varint;

pub use decode::{read_bytes, read_length, read_varint, Decode, MAX_SEQUENCE_LEN};
pub use encode::{encode_fixed_le, encode_sequence, write_sequence, Encode, FixedWidth};
pub use error::CodecError;
pub use varint::{decode_varint, encode_varint, write_varint, MAX_VARINT_LEN};

//! The broadcast envelope around a signed transaction.

use graphene_codec::{CodecError, Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::EosError;
use crate::signature::Signature;
use crate::transaction::Transaction;

/// Largest context-free payload the one-byte size field can describe.
pub const MAX_CONTEXT_FREE_DATA: usize = u8::MAX as usize;

/// Tag byte opening a non-empty context-free block.
const CONTEXT_FREE_TAG: u8 = 1;

/// Compression flag carried in the envelope.
///
/// The tag is stored exactly as given. Nothing in this crate compresses or
/// decompresses; a host that asks for `Zlib` compresses before handing the
/// bytes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CompressionType {
    #[default]
    None = 0,
    Zlib = 1,
}

impl From<CompressionType> for u8 {
    fn from(compression: CompressionType) -> Self {
        compression as u8
    }
}

impl TryFrom<u8> for CompressionType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Zlib),
            other => Err(CodecError::InvalidValue(format!(
                "unknown compression type {other}"
            ))),
        }
    }
}

/// Build the `[1, size, data..]` block for context-free data. Empty data
/// packs to an empty block.
pub fn pack_context_free_data(data: &[u8]) -> Result<Vec<u8>, EosError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let size = u8::try_from(data.len()).map_err(|_| {
        warn!(len = data.len(), max = MAX_CONTEXT_FREE_DATA, "context-free data too large");
        EosError::SerializationOverflow {
            what: "context-free data",
            len: data.len(),
            max: MAX_CONTEXT_FREE_DATA,
        }
    })?;

    let mut block = Vec::with_capacity(2 + data.len());
    block.push(CONTEXT_FREE_TAG);
    block.push(size);
    block.extend_from_slice(data);
    Ok(block)
}

/// Inverse of [`pack_context_free_data`].
pub fn unpack_context_free_data(block: &[u8]) -> Result<Vec<u8>, EosError> {
    match block {
        [] => Ok(Vec::new()),
        [CONTEXT_FREE_TAG, size, data @ ..] if usize::from(*size) == data.len() => {
            Ok(data.to_vec())
        }
        _ => Err(CodecError::InvalidValue("malformed context-free data block".into()).into()),
    }
}

/// A finalized transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedTransaction {
    signatures: Vec<Signature>,
    compression: CompressionType,
    packed_context_free_data: Vec<u8>,
    packed_trx: Vec<u8>,
}

impl PackedTransaction {
    /// Snapshot `transaction`: its signatures, its serialized body and its
    /// context-free data. Later changes to `transaction` are not seen.
    pub fn new(transaction: &Transaction, compression: CompressionType) -> Result<Self, EosError> {
        let packed_context_free_data = pack_context_free_data(transaction.context_free_data())?;
        let packed_trx = transaction.serialize();

        debug!(
            signatures = transaction.signatures().len(),
            context_free_len = packed_context_free_data.len(),
            body_len = packed_trx.len(),
            ?compression,
            "packed transaction"
        );

        Ok(Self {
            signatures: transaction.signatures().to_vec(),
            compression,
            packed_context_free_data,
            packed_trx,
        })
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn compression(&self) -> CompressionType {
        self.compression
    }

    pub fn packed_context_free_data(&self) -> &[u8] {
        &self.packed_context_free_data
    }

    pub fn packed_trx(&self) -> &[u8] {
        &self.packed_trx
    }

    /// SHA-256 of the packed body, as reported by nodes.
    pub fn transaction_id(&self) -> [u8; 32] {
        Sha256::digest(&self.packed_trx).into()
    }

    /// Broadcast bytes.
    pub fn serialize(&self) -> Vec<u8> {
        self.to_bytes()
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, EosError> {
        Ok(Self::from_bytes(data)?)
    }

    /// Rebuild the transaction this envelope was made from.
    ///
    /// The body is read as-is, so this only works for envelopes whose bytes
    /// were not actually compressed.
    pub fn unpack(&self) -> Result<Transaction, EosError> {
        let mut transaction = Transaction::deserialize(&self.packed_trx)?;
        transaction.set_context_free_data(unpack_context_free_data(
            &self.packed_context_free_data,
        )?);
        for signature in &self.signatures {
            transaction.add_signature(*signature);
        }
        Ok(transaction)
    }

    /// Structured rendering for inspection and JSON-speaking hosts.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "signatures": self.signatures.iter().map(Signature::to_text).collect::<Vec<_>>(),
            "compression": u8::from(self.compression),
            "packed_context_free_data": hex::encode(&self.packed_context_free_data),
            "packed_trx": hex::encode(&self.packed_trx),
        })
    }
}

impl Encode for PackedTransaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.signatures.encode(out);
        u8::from(self.compression).encode(out);
        self.packed_context_free_data.encode(out);
        self.packed_trx.encode(out);
    }
}

impl Decode for PackedTransaction {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let signatures = Vec::<Signature>::decode(input)?;
        let compression = CompressionType::try_from(u8::decode(input)?)?;
        let packed_context_free_data = Vec::<u8>::decode(input)?;
        let packed_trx = Vec::<u8>::decode(input)?;
        Ok(Self {
            signatures,
            compression,
            packed_context_free_data,
            packed_trx,
        })
    }
}

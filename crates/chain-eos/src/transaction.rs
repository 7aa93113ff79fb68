//! Transaction body and signing digest.

use chrono::DateTime;
use graphene_codec::{read_varint, CodecError, Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::action::Action;
use crate::error::EosError;
use crate::packed::pack_context_free_data;
use crate::signature::Signature;

/// Seconds between the reference block and expiration unless overridden.
pub const DEFAULT_EXPIRY_SECONDS: u32 = 30;

/// Default `max_transaction_net_usage` of a node (512 KiB) in 8-byte words.
pub const MAX_NET_USAGE_WORDS: u32 = 512 * 1024 / 8;

const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// A typed extension blob appended to the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub kind: u16,
    #[serde(with = "crate::hex_serde")]
    pub data: Vec<u8>,
}

impl Encode for Extension {
    fn encode(&self, out: &mut Vec<u8>) {
        self.kind.encode(out);
        self.data.encode(out);
    }
}

impl Decode for Extension {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            kind: u16::decode(input)?,
            data: Vec::<u8>::decode(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Fixed-width header fields at the front of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionHeader {
    /// Unix seconds after which the node drops the transaction.
    pub expiration: u32,
    /// Low 16 bits of the reference block height.
    pub ref_block_num: u16,
    /// Bytes 8..12 of the reference block id.
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl TransactionHeader {
    fn from_reference(block_id: &[u8; 32], expiration: u32) -> Self {
        Self {
            expiration,
            ref_block_num: u16::from_be_bytes([block_id[2], block_id[3]]),
            ref_block_prefix: u32::from_le_bytes([
                block_id[8],
                block_id[9],
                block_id[10],
                block_id[11],
            ]),
            ..Self::default()
        }
    }
}

impl Encode for TransactionHeader {
    fn encode(&self, out: &mut Vec<u8>) {
        self.expiration.encode(out);
        self.ref_block_num.encode(out);
        self.ref_block_prefix.encode(out);
        graphene_codec::write_varint(u64::from(self.max_net_usage_words), out);
        self.max_cpu_usage_ms.encode(out);
        graphene_codec::write_varint(u64::from(self.delay_sec), out);
    }
}

fn read_varuint32(input: &mut &[u8]) -> Result<u32, CodecError> {
    let value = read_varint(input)?;
    u32::try_from(value).map_err(|_| CodecError::ValueOutOfRange { value, width: 4 })
}

impl Decode for TransactionHeader {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            expiration: u32::decode(input)?,
            ref_block_num: u16::decode(input)?,
            ref_block_prefix: u32::decode(input)?,
            max_net_usage_words: read_varuint32(input)?,
            max_cpu_usage_ms: u8::decode(input)?,
            delay_sec: read_varuint32(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction under construction.
///
/// Only the header, the two action lists and the extensions make up the
/// body. Context-free data and signatures ride alongside and are carried
/// into the packed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: TransactionHeader,
    reference_block_time: u32,
    context_free_actions: Vec<Action>,
    actions: Vec<Action>,
    extensions: Vec<Extension>,
    context_free_data: Vec<u8>,
    signatures: Vec<Signature>,
}

impl Transaction {
    /// Start a transaction anchored at the given block, expiring
    /// [`DEFAULT_EXPIRY_SECONDS`] after `reference_block_time`.
    pub fn new(reference_block_id: &[u8; 32], reference_block_time: u32) -> Self {
        Self {
            header: TransactionHeader::from_reference(
                reference_block_id,
                reference_block_time.saturating_add(DEFAULT_EXPIRY_SECONDS),
            ),
            reference_block_time,
            context_free_actions: Vec::new(),
            actions: Vec::new(),
            extensions: Vec::new(),
            context_free_data: Vec::new(),
            signatures: Vec::new(),
        }
    }

    pub fn from_hex_reference(
        reference_block_id: &str,
        reference_block_time: u32,
    ) -> Result<Self, EosError> {
        let bytes = hex::decode(reference_block_id.trim_start_matches("0x"))
            .map_err(|e| EosError::InvalidReferenceBlock(e.to_string()))?;
        let id: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            EosError::InvalidReferenceBlock(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self::new(&id, reference_block_time))
    }

    /// Replace the expiry window.
    pub fn with_expiry_seconds(mut self, seconds: u32) -> Self {
        self.header.expiration = self.reference_block_time.saturating_add(seconds);
        self
    }

    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn add_context_free_action(&mut self, action: Action) -> &mut Self {
        self.context_free_actions.push(action);
        self
    }

    pub fn add_extension(&mut self, extension: Extension) -> &mut Self {
        self.extensions.push(extension);
        self
    }

    pub fn set_context_free_data(&mut self, data: Vec<u8>) -> &mut Self {
        self.context_free_data = data;
        self
    }

    pub fn add_signature(&mut self, signature: Signature) -> &mut Self {
        self.signatures.push(signature);
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn context_free_actions(&self) -> &[Action] {
        &self.context_free_actions
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn context_free_data(&self) -> &[u8] {
        &self.context_free_data
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The body bytes, in wire order.
    pub fn serialize(&self) -> Vec<u8> {
        self.to_bytes()
    }

    /// Decode a body produced by [`Transaction::serialize`].
    ///
    /// The reference block time is not on the wire; it is taken to be
    /// [`DEFAULT_EXPIRY_SECONDS`] before the decoded expiration.
    pub fn deserialize(data: &[u8]) -> Result<Self, EosError> {
        Ok(Self::from_bytes(data)?)
    }

    /// Structural sanity: a reference block is set, there is something to
    /// execute, and the net usage cap is one a node will accept.
    pub fn is_valid(&self) -> bool {
        (self.header.ref_block_num != 0 || self.header.ref_block_prefix != 0)
            && !self.actions.is_empty()
            && self.header.max_net_usage_words <= MAX_NET_USAGE_WORDS
    }

    /// `sha256(chain_id || body || context_free_digest)`, the value that
    /// gets signed.
    pub fn signing_digest(&self, chain_id: &[u8; 32]) -> Result<[u8; 32], EosError> {
        let context_free_digest: [u8; 32] = if self.context_free_data.is_empty() {
            [0u8; 32]
        } else {
            Sha256::digest(pack_context_free_data(&self.context_free_data)?).into()
        };

        let mut hasher = Sha256::new();
        hasher.update(chain_id);
        hasher.update(self.serialize());
        hasher.update(context_free_digest);
        Ok(hasher.finalize().into())
    }

    /// Expiration as `YYYY-MM-DDTHH:MM:SS` in UTC.
    pub fn expiration_text(&self) -> String {
        DateTime::from_timestamp(i64::from(self.header.expiration), 0)
            .map(|t| t.format(EXPIRATION_FORMAT).to_string())
            .unwrap_or_else(|| self.header.expiration.to_string())
    }

    pub fn to_json(&self) -> serde_json::Value {
        let context_free_data: Vec<String> = if self.context_free_data.is_empty() {
            Vec::new()
        } else {
            vec![hex::encode(&self.context_free_data)]
        };

        serde_json::json!({
            "expiration": self.expiration_text(),
            "ref_block_num": self.header.ref_block_num,
            "ref_block_prefix": self.header.ref_block_prefix,
            "max_net_usage_words": self.header.max_net_usage_words,
            "max_cpu_usage_ms": self.header.max_cpu_usage_ms,
            "delay_sec": self.header.delay_sec,
            "context_free_actions": self.context_free_actions,
            "actions": self.actions,
            "transaction_extensions": self.extensions,
            "signatures": self.signatures,
            "context_free_data": context_free_data,
        })
    }
}

impl Encode for Transaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.header.encode(out);
        self.context_free_actions.encode(out);
        self.actions.encode(out);
        self.extensions.encode(out);
    }
}

impl Decode for Transaction {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let header = TransactionHeader::decode(input)?;
        Ok(Self {
            header,
            reference_block_time: header.expiration.saturating_sub(DEFAULT_EXPIRY_SECONDS),
            context_free_actions: Vec::<Action>::decode(input)?,
            actions: Vec::<Action>::decode(input)?,
            extensions: Vec::<Extension>::decode(input)?,
            context_free_data: Vec::new(),
            signatures: Vec::new(),
        })
    }
}

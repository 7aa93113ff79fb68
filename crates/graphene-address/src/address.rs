use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::checksum::checksum;
use crate::error::AddressError;
use crate::generation::Generation;
use crate::key::{PublicKeyBytes, CHECKSUM_SIZE, KEY_DATA_SIZE, MAX_BASE58_LEN, PUBLIC_KEY_SIZE};
use crate::profile::{Bitshares, ChainProfile, Eos, Steem};

pub type EosAddress = Address<Eos>;
pub type SteemAddress = Address<Steem>;
pub type BitsharesAddress = Address<Bitshares>;

/// A checksum-verified public-key address on chain profile `P`.
///
/// Every live value satisfies `checksum == checksum(key, generation)`:
/// the only constructors either compute the checksum or verify it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address<P: ChainProfile> {
    key: PublicKeyBytes,
    checksum: [u8; CHECKSUM_SIZE],
    generation: Generation,
    profile: PhantomData<P>,
}

impl<P: ChainProfile> Address<P> {
    /// Derive the address of `key` in the given generation.
    pub fn from_public_key(key: &PublicKeyBytes, generation: Generation) -> Self {
        Self {
            key: *key,
            checksum: checksum(key.as_bytes(), generation.domain_separator()),
            generation,
            profile: PhantomData,
        }
    }

    /// Build an address from raw key data (`key || checksum`), verifying the
    /// checksum for `generation`.
    pub fn from_bytes(data: &[u8], generation: Generation) -> Result<Self, AddressError> {
        let (key, checksum) = verify_key_data(data, generation)?;
        Ok(Self {
            key,
            checksum,
            generation,
            profile: PhantomData,
        })
    }

    /// Parse the textual form, resolving the generation from its prefix.
    pub fn decode(text: &str) -> Result<Self, AddressError> {
        Self::decode_inner(text).map_err(|err| {
            debug!(profile = P::NAME, error = %err, "address decode rejected");
            err
        })
    }

    /// Parse the textual form, requiring a specific generation.
    ///
    /// A well-formed address of another generation is reported as
    /// [`AddressError::GenerationMismatch`] rather than as malformed.
    pub fn decode_as(text: &str, generation: Generation) -> Result<Self, AddressError> {
        let address = Self::decode(text)?;
        if address.generation != generation {
            return Err(AddressError::GenerationMismatch {
                expected: generation,
                found: address.generation,
            });
        }
        Ok(address)
    }

    fn decode_inner(text: &str) -> Result<Self, AddressError> {
        let (generation, body) = P::split_prefix(text).ok_or_else(|| {
            AddressError::MalformedText(format!("unrecognized {} address prefix", P::NAME))
        })?;

        if body.len() > MAX_BASE58_LEN {
            return Err(AddressError::MalformedText(format!(
                "base58 body too long: {} characters, max {MAX_BASE58_LEN}",
                body.len()
            )));
        }

        let data = bs58::decode(body)
            .into_vec()
            .map_err(|e| AddressError::MalformedText(format!("invalid base58: {e}")))?;

        Self::from_bytes(&data, generation)
    }

    /// Whether `text` decodes to a valid address on this profile.
    pub fn is_valid_text(text: &str) -> bool {
        Self::decode_inner(text).is_ok()
    }

    /// Whether `data` is exactly `key || checksum` with a checksum valid for
    /// `generation`.
    pub fn is_valid_bytes(data: &[u8], generation: Generation) -> bool {
        verify_key_data(data, generation).is_ok()
    }

    /// Render as prefix + base58(key || checksum).
    pub fn to_text(&self) -> String {
        let mut text = String::from(self.prefix());
        text.push_str(&bs58::encode(self.to_bytes()).into_string());
        text
    }

    pub fn prefix(&self) -> &'static str {
        P::prefix(self.generation)
    }

    pub fn public_key(&self) -> &PublicKeyBytes {
        &self.key
    }

    pub fn checksum(&self) -> [u8; CHECKSUM_SIZE] {
        self.checksum
    }

    /// The checksum read as a little-endian integer.
    pub fn checksum_u32(&self) -> u32 {
        u32::from_le_bytes(self.checksum)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The 37-byte `key || checksum` payload.
    pub fn to_bytes(&self) -> [u8; KEY_DATA_SIZE] {
        let mut out = [0u8; KEY_DATA_SIZE];
        out[..PUBLIC_KEY_SIZE].copy_from_slice(self.key.as_bytes());
        out[PUBLIC_KEY_SIZE..].copy_from_slice(&self.checksum);
        out
    }
}

/// Split and verify `key || checksum` for `generation`.
fn verify_key_data(
    data: &[u8],
    generation: Generation,
) -> Result<(PublicKeyBytes, [u8; CHECKSUM_SIZE]), AddressError> {
    if data.len() != KEY_DATA_SIZE {
        return Err(AddressError::WrongLength {
            expected: KEY_DATA_SIZE,
            actual: data.len(),
        });
    }

    let (key_part, checksum_part) = data.split_at(PUBLIC_KEY_SIZE);
    let key = PublicKeyBytes::try_from(key_part)?;

    let mut embedded = [0u8; CHECKSUM_SIZE];
    embedded.copy_from_slice(checksum_part);

    let expected = checksum(key.as_bytes(), generation.domain_separator());
    if expected != embedded {
        return Err(AddressError::ChecksumMismatch {
            expected: u32::from_le_bytes(expected),
            actual: u32::from_le_bytes(embedded),
        });
    }

    Ok((key, embedded))
}

impl<P: ChainProfile> fmt::Display for Address<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl<P: ChainProfile> fmt::Debug for Address<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Address")
            .field("profile", &P::NAME)
            .field("generation", &self.generation)
            .field("text", &self.to_text())
            .finish()
    }
}

impl<P: ChainProfile> FromStr for Address<P> {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl<P: ChainProfile> Serialize for Address<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de, P: ChainProfile> Deserialize<'de> for Address<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::decode(&text).map_err(serde::de::Error::custom)
    }
}

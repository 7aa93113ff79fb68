use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::error::AddressError;

/// Size of a compressed elliptic-curve public key.
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Size of the trailing address checksum.
pub const CHECKSUM_SIZE: usize = 4;

/// Key bytes followed by checksum: the payload behind the base58 text.
pub const KEY_DATA_SIZE: usize = PUBLIC_KEY_SIZE + CHECKSUM_SIZE;

/// Upper bound on the base58 rendering of [`KEY_DATA_SIZE`] bytes.
///
/// Text bodies longer than this are rejected before decoding.
pub const MAX_BASE58_LEN: usize = KEY_DATA_SIZE * 138 / 100 + 2;

/// A 33-byte compressed public key.
///
/// The size is part of the type, so address derivation has no runtime
/// length check to forget.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyBytes([u8; PUBLIC_KEY_SIZE]);

impl PublicKeyBytes {
    pub const fn new(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Parse a hex-encoded compressed key.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| AddressError::InvalidPublicKey(format!("invalid hex: {e}")))?;
        Self::try_from(bytes.as_slice())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compressed SEC1 encoding of a secp256k1 key.
    pub fn from_k1(key: &k256::PublicKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    /// Interpret the bytes as a secp256k1 point, rejecting anything off-curve.
    pub fn to_k1(&self) -> Result<k256::PublicKey, AddressError> {
        k256::PublicKey::from_sec1_bytes(&self.0)
            .map_err(|e| AddressError::InvalidPublicKey(format!("not a secp256k1 point: {e}")))
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKeyBytes {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKeyBytes {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PUBLIC_KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| AddressError::InvalidKeySize {
                    expected: PUBLIC_KEY_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for PublicKeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKeyBytes({})", self.to_hex())
    }
}

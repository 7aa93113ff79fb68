use ripemd::{Digest, Ripemd160};

use crate::key::CHECKSUM_SIZE;

/// Salted RIPEMD-160 checksum: the first four bytes of
/// `RIPEMD-160(data || separator)`.
///
/// This only catches transcription errors; it authenticates nothing.
pub fn checksum(data: &[u8], separator: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(separator);
    let hash = hasher.finalize();

    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&hash[..CHECKSUM_SIZE]);
    out
}

use crate::error::CodecError;
use crate::varint::write_varint;

/// Types with a single canonical byte encoding.
///
/// Implementations must write every field in wire order; the output is
/// hashed and signed, so two encoders that disagree on a byte produce two
/// different transactions.
pub trait Encode {
    /// Append the canonical encoding of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, out: &mut Vec<u8>) {
        (**self).encode(out);
    }
}

macro_rules! impl_fixed_le {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_fixed_le!(u8, u16, u32, u64, i64);

/// Fixed-size byte arrays are written raw: the width is implied by the type.
impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, out: &mut Vec<u8>) {
        write_sequence(self, out, |item, out| item.encode(out));
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_slice().encode(out);
    }
}

impl Encode for str {
    fn encode(&self, out: &mut Vec<u8>) {
        write_varint(self.len() as u64, out);
        out.extend_from_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_str().encode(out);
    }
}

/// Width selector for [`encode_fixed_le`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedWidth {
    Four,
    Eight,
}

impl FixedWidth {
    pub const fn bytes(self) -> usize {
        match self {
            FixedWidth::Four => 4,
            FixedWidth::Eight => 8,
        }
    }
}

/// Encode an unsigned integer as a fixed-width little-endian field.
///
/// A value that does not fit the requested width is an error, never a
/// silent truncation.
pub fn encode_fixed_le(value: u64, width: FixedWidth) -> Result<Vec<u8>, CodecError> {
    match width {
        FixedWidth::Four => u32::try_from(value)
            .map(|v| v.to_le_bytes().to_vec())
            .map_err(|_| CodecError::ValueOutOfRange {
                value,
                width: width.bytes(),
            }),
        FixedWidth::Eight => Ok(value.to_le_bytes().to_vec()),
    }
}

/// Append `varint(items.len())` followed by each item, in order.
pub fn write_sequence<T, F>(items: &[T], out: &mut Vec<u8>, mut item_encoder: F)
where
    F: FnMut(&T, &mut Vec<u8>),
{
    write_varint(items.len() as u64, out);
    for item in items {
        item_encoder(item, out);
    }
}

/// Encode a length-prefixed sequence with a caller-supplied item encoder.
pub fn encode_sequence<T, F>(items: &[T], item_encoder: F) -> Vec<u8>
where
    F: FnMut(&T, &mut Vec<u8>),
{
    let mut out = Vec::new();
    write_sequence(items, &mut out, item_encoder);
    out
}

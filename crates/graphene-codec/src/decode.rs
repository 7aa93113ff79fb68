use crate::error::CodecError;
use crate::varint::decode_varint;

/// Upper bound on any decoded sequence length.
///
/// Checked before allocating, together with the remaining input size, so a
/// hostile length prefix cannot trigger a large allocation.
pub const MAX_SEQUENCE_LEN: u64 = 1 << 20;

/// Types that can be read back from their canonical encoding.
pub trait Decode: Sized {
    /// Decode one value from the front of `input`, advancing it past the
    /// consumed bytes.
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError>;

    /// Decode a value that must span the whole of `data`.
    fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut input = data;
        let value = Self::decode(&mut input)?;
        if !input.is_empty() {
            return Err(CodecError::TrailingBytes(input.len()));
        }
        Ok(value)
    }
}

/// Split `n` bytes off the front of `input`.
pub fn read_bytes<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], CodecError> {
    if input.len() < n {
        return Err(CodecError::UnexpectedEof {
            needed: n - input.len(),
        });
    }
    let (head, rest) = input.split_at(n);
    *input = rest;
    Ok(head)
}

/// Read a varint from the front of `input`.
pub fn read_varint(input: &mut &[u8]) -> Result<u64, CodecError> {
    let (value, consumed) = decode_varint(input)?;
    *input = &input[consumed..];
    Ok(value)
}

/// Read a sequence length prefix.
///
/// Every element of every sequence this codec knows encodes to at least one
/// byte, so a count larger than the remaining input is already malformed.
pub fn read_length(input: &mut &[u8]) -> Result<usize, CodecError> {
    let len = read_varint(input)?;
    let max = MAX_SEQUENCE_LEN.min(input.len() as u64);
    if len > max {
        return Err(CodecError::LengthOverflow { len, max });
    }
    Ok(len as usize)
}

macro_rules! impl_fixed_le {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
                    const WIDTH: usize = std::mem::size_of::<$t>();
                    let mut buf = [0u8; WIDTH];
                    buf.copy_from_slice(read_bytes(input, WIDTH)?);
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_fixed_le!(u8, u16, u32, u64, i64);

impl<const N: usize> Decode for [u8; N] {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(read_bytes(input, N)?);
        Ok(buf)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = read_length(input)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}

impl Decode for String {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let bytes = Vec::<u8>::decode(input)?;
        String::from_utf8(bytes).map_err(|e| CodecError::InvalidValue(format!("utf-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Encode;

    #[test]
    fn fixed_integers_decode_little_endian() {
        assert_eq!(u32::from_bytes(&[0x78, 0x56, 0x34, 0x12]).unwrap(), 0x1234_5678);
        assert_eq!(i64::from_bytes(&[0xff; 8]).unwrap(), -1);
    }

    #[test]
    fn every_fixed_width_reads_its_own_size() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(u8::decode(&mut &data[..]).unwrap(), 0x01);
        assert_eq!(u16::decode(&mut &data[..]).unwrap(), 0x0201);
        assert_eq!(u32::decode(&mut &data[..]).unwrap(), 0x0403_0201);
        assert_eq!(u64::decode(&mut &data[..]).unwrap(), 0x0807_0605_0403_0201);
        assert_eq!(i64::decode(&mut &data[..]).unwrap(), 0x0807_0605_0403_0201);

        let mut input = &data[..];
        u16::decode(&mut input).unwrap();
        u32::decode(&mut input).unwrap();
        assert_eq!(input, &[0x07, 0x08]);
    }

    #[test]
    fn decode_advances_input() {
        let data = [0x01, 0x00, 0x02];
        let mut input = &data[..];
        assert_eq!(u16::decode(&mut input).unwrap(), 1);
        assert_eq!(input, &[0x02]);
    }

    #[test]
    fn short_input_reports_missing_bytes() {
        assert_eq!(
            u64::from_bytes(&[0x01, 0x02, 0x03]),
            Err(CodecError::UnexpectedEof { needed: 5 })
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(
            u8::from_bytes(&[0x01, 0x02]),
            Err(CodecError::TrailingBytes(1))
        );
    }

    #[test]
    fn sequence_roundtrip() {
        let items = vec![vec![1u8, 2], vec![], vec![3u8]];
        let encoded = items.to_bytes();
        assert_eq!(Vec::<Vec<u8>>::from_bytes(&encoded).unwrap(), items);
    }

    #[test]
    fn length_prefix_larger_than_input_rejected() {
        // Claims 0x7f elements but carries only two bytes.
        let err = Vec::<u8>::from_bytes(&[0x7f, 0x01, 0x02]).unwrap_err();
        assert_eq!(err, CodecError::LengthOverflow { len: 0x7f, max: 2 });
    }

    #[test]
    fn huge_length_prefix_rejected_before_allocation() {
        let mut data = crate::varint::encode_varint(u64::MAX);
        data.extend_from_slice(&[0u8; 16]);
        assert!(matches!(
            Vec::<u8>::from_bytes(&data),
            Err(CodecError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        assert!(matches!(
            String::from_bytes(&[0x02, 0xff, 0xfe]),
            Err(CodecError::InvalidValue(_))
        ));
    }

    #[test]
    fn fixed_array_decodes_without_prefix() {
        let arr: [u8; 3] = <[u8; 3]>::from_bytes(&[9, 8, 7]).unwrap();
        assert_eq!(arr, [9, 8, 7]);
    }
}

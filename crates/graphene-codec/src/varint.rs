use crate::error::CodecError;

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Append `value` to `out` as an unsigned LEB128 varint.
///
/// - Values 0..0x7f      -> 1 byte
/// - Values 0x80..0x3fff -> 2 bytes
/// - and so on, 7 payload bits per byte, up to 10 bytes for `u64::MAX`
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut val = value;

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }
}

/// Encode `value` as an unsigned LEB128 varint.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    write_varint(value, &mut out);
    out
}

/// Decode a varint from the front of `data`.
///
/// Returns `(value, bytes_consumed)`. Only the shortest encoding of a value
/// is accepted: a trailing zero byte after a continuation is rejected, as
/// are encodings longer than ten bytes or whose tenth byte carries more
/// than the single remaining bit.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value: u64 = 0;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(CodecError::VarintOverflow);
        }

        let payload = u64::from(byte & 0x7f);
        if i == MAX_VARINT_LEN - 1 && payload > 1 {
            return Err(CodecError::VarintOverflow);
        }
        value |= payload << (7 * i as u32);

        if byte & 0x80 == 0 {
            if byte == 0 && i > 0 {
                return Err(CodecError::NonCanonicalVarint);
            }
            return Ok((value, i + 1));
        }
    }

    Err(CodecError::UnexpectedEof { needed: 1 })
}

use thiserror::Error;

/// Canonical codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} more bytes")]
    UnexpectedEof { needed: usize },

    #[error("varint overflow: value does not fit in 64 bits")]
    VarintOverflow,

    #[error("non-canonical varint: encoding has redundant trailing bytes")]
    NonCanonicalVarint,

    #[error("length overflow: {len} exceeds limit of {max}")]
    LengthOverflow { len: u64, max: u64 },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("trailing bytes: {0} bytes left after decoding")]
    TrailingBytes(usize),

    #[error("value out of range: {value} does not fit in {width} bytes")]
    ValueOutOfRange { value: u64, width: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_eof() {
        let err = CodecError::UnexpectedEof { needed: 4 };
        assert_eq!(err.to_string(), "unexpected end of input: needed 4 more bytes");
    }

    #[test]
    fn display_non_canonical_varint() {
        assert_eq!(
            CodecError::NonCanonicalVarint.to_string(),
            "non-canonical varint: encoding has redundant trailing bytes"
        );
    }

    #[test]
    fn display_length_overflow() {
        let err = CodecError::LengthOverflow { len: 300, max: 12 };
        assert_eq!(err.to_string(), "length overflow: 300 exceeds limit of 12");
    }

    #[test]
    fn display_value_out_of_range() {
        let err = CodecError::ValueOutOfRange {
            value: 1 << 40,
            width: 4,
        };
        assert!(err.to_string().contains("4 bytes"));
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(CodecError::TrailingBytes(3));
        assert!(err.to_string().contains('3'));
    }
}

use graphene_codec::CodecError;
use thiserror::Error;

/// Bitshares value errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BtsError {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_object_id() {
        let err = BtsError::InvalidObjectId("1.2".into());
        assert_eq!(err.to_string(), "invalid object id: 1.2");
    }

    #[test]
    fn codec_error_converts() {
        let err: BtsError = CodecError::VarintOverflow.into();
        assert!(err.to_string().starts_with("codec error: "));
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(BtsError::InvalidObjectId("x".into()));
        assert!(err.to_string().contains("x"));
    }
}

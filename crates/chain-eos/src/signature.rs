use std::fmt;
use std::str::FromStr;

use graphene_address::{checksum, Curve, PublicKeyBytes, CHECKSUM_SIZE};
use graphene_codec::{read_varint, CodecError, Decode, Encode};
use k256::ecdsa::{RecoveryId, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EosError;

/// Header byte plus 32-byte `r` and 32-byte `s`.
pub const SIGNATURE_SIZE: usize = 65;

/// Longest base58 body that can encode a signature plus checksum.
const MAX_BASE58_LEN: usize = (SIGNATURE_SIZE + CHECKSUM_SIZE) * 138 / 100 + 2;

/// Offset added to the recovery id to form the header byte of a
/// compressed-key signature.
const HEADER_BASE: u8 = 27 + 4;

/// A recoverable ECDSA signature tagged with its curve.
///
/// Layout of `data`: `[header, r(32), s(32)]` where `header` is
/// `31 + recovery_id`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    curve: Curve,
    data: [u8; SIGNATURE_SIZE],
}

impl Signature {
    pub fn new(curve: Curve, data: [u8; SIGNATURE_SIZE]) -> Self {
        Self { curve, data }
    }

    /// Wrap a secp256k1 signature produced by a prehash signer.
    pub fn from_k1_recoverable(signature: &k256::ecdsa::Signature, recovery_id: RecoveryId) -> Self {
        let mut data = [0u8; SIGNATURE_SIZE];
        data[0] = HEADER_BASE + recovery_id.to_byte();
        data[1..].copy_from_slice(&signature.to_bytes());
        Self {
            curve: Curve::K1,
            data,
        }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.data
    }

    /// Whether the node will accept this signature: neither `r` nor `s`
    /// may have its top bit set, nor be padded with a needless zero byte.
    pub fn is_canonical(&self) -> bool {
        let d = &self.data;
        d[1] & 0x80 == 0
            && !(d[1] == 0 && d[2] & 0x80 == 0)
            && d[33] & 0x80 == 0
            && !(d[33] == 0 && d[34] & 0x80 == 0)
    }

    /// Recover the compressed public key that produced this signature over
    /// `digest`.
    pub fn recover_k1(&self, digest: &[u8; 32]) -> Result<PublicKeyBytes, EosError> {
        if self.curve != Curve::K1 {
            return Err(EosError::InvalidSignature(format!(
                "cannot recover a {} signature with secp256k1",
                self.curve
            )));
        }

        let recovery_id = self
            .data[0]
            .checked_sub(HEADER_BASE)
            .and_then(RecoveryId::from_byte)
            .ok_or_else(|| {
                EosError::InvalidSignature(format!("bad header byte {}", self.data[0]))
            })?;
        let signature = k256::ecdsa::Signature::from_slice(&self.data[1..])
            .map_err(|e| EosError::InvalidSignature(e.to_string()))?;
        let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|e| EosError::InvalidSignature(format!("recovery failed: {e}")))?;

        Ok(PublicKeyBytes::try_from(key.to_encoded_point(true).as_bytes())?)
    }

    fn prefix(curve: Curve) -> &'static str {
        match curve {
            Curve::K1 => "SIG_K1_",
            Curve::R1 => "SIG_R1_",
        }
    }

    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(SIGNATURE_SIZE + CHECKSUM_SIZE);
        payload.extend_from_slice(&self.data);
        payload.extend_from_slice(&checksum(&self.data, self.curve.separator()));
        format!(
            "{}{}",
            Self::prefix(self.curve),
            bs58::encode(payload).into_string()
        )
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_text())
    }
}

impl FromStr for Signature {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (curve, body) = [Curve::K1, Curve::R1]
            .into_iter()
            .find_map(|curve| s.strip_prefix(Self::prefix(curve)).map(|body| (curve, body)))
            .ok_or_else(|| EosError::InvalidSignature(format!("unknown prefix in {s:?}")))?;

        if body.len() > MAX_BASE58_LEN {
            return Err(EosError::InvalidSignature(format!(
                "base58 body too long: {} characters, max {MAX_BASE58_LEN}",
                body.len()
            )));
        }

        let payload = bs58::decode(body)
            .into_vec()
            .map_err(|e| EosError::InvalidSignature(format!("bad base58: {e}")))?;
        if payload.len() != SIGNATURE_SIZE + CHECKSUM_SIZE {
            return Err(EosError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_SIZE + CHECKSUM_SIZE,
                payload.len()
            )));
        }

        let (data, check) = payload.split_at(SIGNATURE_SIZE);
        if checksum(data, curve.separator()) != check {
            return Err(EosError::InvalidSignature("checksum mismatch".into()));
        }

        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(data);
        Ok(Self::new(curve, bytes))
    }
}

/// Wire form: curve index as a varint, then the 65 raw bytes.
impl Encode for Signature {
    fn encode(&self, out: &mut Vec<u8>) {
        graphene_codec::write_varint(u64::from(self.curve.index()), out);
        self.data.encode(out);
    }
}

impl Decode for Signature {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let index = read_varint(input)?;
        let curve = Curve::from_index(index).ok_or_else(|| {
            CodecError::InvalidValue(format!("unknown signature curve {index}"))
        })?;
        Ok(Self::new(curve, <[u8; SIGNATURE_SIZE]>::decode(input)?))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;
    use sha2::{Digest, Sha256};

    const SAMPLE_K1: &str = "SIG_K1_JuPRYrQuGBoWkbrwZ1uLuiwG19vUfL1LRkPryc8sD7QprezRWyZLsjBzyxuTZFJHeu784LNVdTNs2YQPq289cYMGcpTXAS";
    const SAMPLE_R1: &str = "SIG_R1_JuPRYrQuGBoWkbrwZ1uLuiwG19vUfL1LRkPryc8sD7QprezRWyZLsjBzyxuTZFJHeu784LNVdTNs2YQPq289cYMGcyghGZ";

    fn sample_data() -> [u8; SIGNATURE_SIZE] {
        let mut data = [0u8; SIGNATURE_SIZE];
        data[0] = 0x1f;
        for (i, byte) in data.iter_mut().enumerate().skip(1) {
            *byte = i as u8;
        }
        data
    }

    fn sign(key: &SigningKey, digest: &[u8; 32]) -> Signature {
        let (signature, recovery_id) = key.sign_prehash_recoverable(digest).unwrap();
        Signature::from_k1_recoverable(&signature, recovery_id)
    }

    #[test]
    fn text_encoding_per_curve() {
        assert_eq!(Signature::new(Curve::K1, sample_data()).to_text(), SAMPLE_K1);
        assert_eq!(Signature::new(Curve::R1, sample_data()).to_text(), SAMPLE_R1);
    }

    #[test]
    fn parses_text() {
        let sig: Signature = SAMPLE_K1.parse().unwrap();
        assert_eq!(sig.curve(), Curve::K1);
        assert_eq!(sig.as_bytes(), &sample_data());
        let sig: Signature = SAMPLE_R1.parse().unwrap();
        assert_eq!(sig.curve(), Curve::R1);
    }

    #[test]
    fn rejects_swapped_curve_prefix() {
        let swapped = SAMPLE_K1.replacen("SIG_K1_", "SIG_R1_", 1);
        assert!(matches!(
            swapped.parse::<Signature>(),
            Err(EosError::InvalidSignature(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Signature>().is_err());
        assert!("SIG_K1_".parse::<Signature>().is_err());
        assert!("SIG_K1_0OIl".parse::<Signature>().is_err());
        assert!("SIG_K2_abc".parse::<Signature>().is_err());
    }

    #[test]
    fn rejects_oversized_body_before_decoding() {
        assert_eq!(MAX_BASE58_LEN, 97);
        let text = format!("SIG_K1_{}", "2".repeat(40_000));
        match text.parse::<Signature>() {
            Err(EosError::InvalidSignature(reason)) => assert!(reason.contains("too long")),
            other => panic!("unexpected result: {other:?}"),
        }

        let json = serde_json::to_string(&vec![text]).unwrap();
        assert!(serde_json::from_str::<Vec<Signature>>(&json).is_err());
    }

    #[test]
    fn longest_valid_body_fits() {
        let mut data = [0xffu8; SIGNATURE_SIZE];
        data[1] = 0x7f;
        let text = Signature::new(Curve::K1, data).to_text();
        assert!(text.len() - "SIG_K1_".len() <= MAX_BASE58_LEN);
        assert_eq!(text.parse::<Signature>().unwrap().as_bytes(), &data);
    }

    #[test]
    fn wire_form() {
        let bytes = Signature::new(Curve::R1, sample_data()).to_bytes();
        assert_eq!(bytes.len(), 1 + SIGNATURE_SIZE);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..], &sample_data());
        let back = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(back.curve(), Curve::R1);
    }

    #[test]
    fn wire_rejects_unknown_curve() {
        let mut bytes = Signature::new(Curve::K1, sample_data()).to_bytes();
        bytes[0] = 0x02;
        assert!(matches!(
            Signature::from_bytes(&bytes),
            Err(CodecError::InvalidValue(_))
        ));
    }

    #[test]
    fn canonical_check() {
        assert!(Signature::new(Curve::K1, sample_data()).is_canonical());

        let mut high_r = sample_data();
        high_r[1] = 0x80;
        assert!(!Signature::new(Curve::K1, high_r).is_canonical());

        let mut padded_s = sample_data();
        padded_s[33] = 0x00;
        padded_s[34] = 0x10;
        assert!(!Signature::new(Curve::K1, padded_s).is_canonical());

        let mut needed_zero = sample_data();
        needed_zero[33] = 0x00;
        needed_zero[34] = 0x90;
        assert!(Signature::new(Curve::K1, needed_zero).is_canonical());
    }

    #[test]
    fn sign_and_recover() {
        let key = SigningKey::from_bytes((&[0x11u8; 32]).into()).unwrap();
        let digest: [u8; 32] = Sha256::digest(b"graphene").into();
        let signature = sign(&key, &digest);

        assert!((31..=34).contains(&signature.as_bytes()[0]));
        let expected = PublicKeyBytes::from_k1(&k256::PublicKey::from(key.verifying_key()));
        assert_eq!(signature.recover_k1(&digest).unwrap(), expected);
    }

    #[test]
    fn recovery_over_other_digest_gives_other_key() {
        let key = SigningKey::from_bytes((&[0x22u8; 32]).into()).unwrap();
        let digest = [7u8; 32];
        let signature = sign(&key, &digest);
        let expected = PublicKeyBytes::from_k1(&k256::PublicKey::from(key.verifying_key()));
        match signature.recover_k1(&[8u8; 32]) {
            Ok(recovered) => assert_ne!(recovered, expected),
            Err(err) => assert!(matches!(err, EosError::InvalidSignature(_))),
        }
    }

    #[test]
    fn recover_rejects_r1() {
        let sig = Signature::new(Curve::R1, sample_data());
        assert!(matches!(
            sig.recover_k1(&[0u8; 32]),
            Err(EosError::InvalidSignature(_))
        ));
    }

    #[test]
    fn recover_rejects_bad_header() {
        let mut data = sample_data();
        data[0] = 0x00;
        assert!(Signature::new(Curve::K1, data).recover_k1(&[0u8; 32]).is_err());
    }

    #[test]
    fn serde_as_text() {
        let sig = Signature::new(Curve::K1, sample_data());
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{SAMPLE_K1}\""));
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), sig);
    }
}

use graphene_codec::{read_varint, CodecError, Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::BtsError;
use crate::object_id::ObjectId;

/// An amount of a Bitshares asset, in the asset's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AssetJson")]
pub struct Asset {
    pub amount: i64,
    pub asset_id: ObjectId,
}

impl Asset {
    /// `amount` of asset `1.3.<instance>`.
    pub const fn new(amount: i64, instance: u64) -> Self {
        Self {
            amount,
            asset_id: ObjectId::asset(instance),
        }
    }
}

/// Only the instance goes on the wire; the space and type are implied.
impl Encode for Asset {
    fn encode(&self, out: &mut Vec<u8>) {
        self.amount.encode(out);
        graphene_codec::write_varint(self.asset_id.instance, out);
    }
}

impl Decode for Asset {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let amount = i64::decode(input)?;
        let instance = read_varint(input)?;
        Ok(Self::new(amount, instance))
    }
}

#[derive(Deserialize)]
struct AssetJson {
    amount: i64,
    asset_id: ObjectId,
}

impl TryFrom<AssetJson> for Asset {
    type Error = BtsError;

    fn try_from(json: AssetJson) -> Result<Self, Self::Error> {
        if !json.asset_id.is_asset() {
            return Err(BtsError::InvalidObjectId(format!(
                "{} is not an asset id",
                json.asset_id
            )));
        }
        Ok(Self {
            amount: json.amount,
            asset_id: json.asset_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_instance() {
        assert_eq!(hex::encode(Asset::new(2, 0).to_bytes()), "020000000000000000");
    }

    #[test]
    fn multi_byte_instance() {
        assert_eq!(hex::encode(Asset::new(511, 256).to_bytes()), "ff010000000000008002");
    }

    #[test]
    fn json_rendering() {
        assert_eq!(
            serde_json::to_string(&Asset::new(511, 256)).unwrap(),
            r#"{"amount":511,"asset_id":"1.3.256"}"#
        );
    }

    #[test]
    fn json_parsing() {
        let asset: Asset = serde_json::from_str(r#"{"amount":-5,"asset_id":"1.3.0"}"#).unwrap();
        assert_eq!(asset, Asset::new(-5, 0));
        assert!(serde_json::from_str::<Asset>(r#"{"amount":1,"asset_id":"1.2.0"}"#).is_err());
    }

    #[test]
    fn decode_roundtrip() {
        let asset = Asset::new(i64::MIN, u64::MAX);
        assert_eq!(Asset::from_bytes(&asset.to_bytes()).unwrap(), asset);
    }

    #[test]
    fn decode_truncated() {
        assert!(matches!(
            Asset::from_bytes(&[0xff, 0x01, 0x00]),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}

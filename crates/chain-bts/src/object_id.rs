use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BtsError;

/// Protocol object space.
pub const ASSET_OBJECT_SPACE: u8 = 1;
/// Asset object type within the protocol space.
pub const ASSET_OBJECT_TYPE: u8 = 3;

/// A `space.type.instance` reference to a chain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    pub space: u8,
    pub kind: u8,
    pub instance: u64,
}

impl ObjectId {
    pub const fn new(space: u8, kind: u8, instance: u64) -> Self {
        Self {
            space,
            kind,
            instance,
        }
    }

    /// `1.3.<instance>`
    pub const fn asset(instance: u64) -> Self {
        Self::new(ASSET_OBJECT_SPACE, ASSET_OBJECT_TYPE, instance)
    }

    pub fn is_asset(&self) -> bool {
        self.space == ASSET_OBJECT_SPACE && self.kind == ASSET_OBJECT_TYPE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.kind, self.instance)
    }
}

impl FromStr for ObjectId {
    type Err = BtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BtsError::InvalidObjectId(s.to_string());
        let mut parts = s.split('.');
        let (Some(space), Some(kind), Some(instance), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(Self {
            space: space.parse().map_err(|_| invalid())?,
            kind: kind.parse().map_err(|_| invalid())?,
            instance: instance.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        let id: ObjectId = "1.3.256".parse().unwrap();
        assert_eq!(id, ObjectId::asset(256));
        assert!(id.is_asset());
        assert_eq!(id.to_string(), "1.3.256");
    }

    #[test]
    fn account_ids_are_not_assets() {
        let id: ObjectId = "1.2.17".parse().unwrap();
        assert!(!id.is_asset());
    }

    #[test]
    fn rejects_malformed() {
        for text in ["", "1.3", "1.3.x", "1.3.4.5", "256.3.1", "-1.3.0", "1..3"] {
            assert!(text.parse::<ObjectId>().is_err(), "{text}");
        }
    }
}

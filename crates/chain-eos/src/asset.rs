use std::fmt;
use std::str::FromStr;

use graphene_codec::{CodecError, Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EosError;

/// Largest precision whose scale factor still fits in a `u64`.
pub const MAX_PRECISION: u8 = 18;

/// Longest token code.
pub const MAX_SYMBOL_CODE_LEN: usize = 7;

/// Token symbol: precision in the low byte, up to seven uppercase letters
/// in the bytes above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u64);

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, EosError> {
        if precision > MAX_PRECISION {
            return Err(EosError::InvalidAsset(format!(
                "precision {precision} exceeds {MAX_PRECISION}"
            )));
        }
        if code.is_empty() || code.len() > MAX_SYMBOL_CODE_LEN {
            return Err(EosError::InvalidAsset(format!(
                "symbol code {code:?} must be 1 to {MAX_SYMBOL_CODE_LEN} characters"
            )));
        }
        if !code.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(EosError::InvalidAsset(format!(
                "symbol code {code:?} must be uppercase A-Z"
            )));
        }

        let value = code
            .bytes()
            .enumerate()
            .fold(u64::from(precision), |acc, (i, c)| acc | u64::from(c) << (8 * (i + 1)));
        Ok(Self(value))
    }

    pub fn precision(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub fn code(&self) -> String {
        self.0.to_le_bytes()[1..]
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as char)
            .collect()
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision(), self.code())
    }
}

impl Encode for Symbol {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }
}

impl Decode for Symbol {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let raw = u64::decode(input)?;
        let precision = (raw & 0xff) as u8;
        let code: String = raw.to_le_bytes()[1..]
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as char)
            .collect();
        let symbol = Symbol::new(precision, &code)
            .map_err(|e| CodecError::InvalidValue(e.to_string()))?;
        // Bytes after the terminating zero must be zero too.
        if symbol.0 != raw {
            return Err(CodecError::InvalidValue(format!("non-canonical symbol {raw:#018x}")));
        }
        Ok(symbol)
    }
}

/// A token quantity such as `"1.0000 EOS"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }
}

impl FromStr for Asset {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EosError::InvalidAsset(format!("{s:?}: {reason}"));

        let (quantity, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("expected \"<amount> <SYMBOL>\""))?;

        let (negative, digits) = match quantity.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, quantity),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((_, "")) => return Err(invalid("missing digits after decimal point")),
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be decimal digits"));
        }
        if fraction.len() > usize::from(MAX_PRECISION) {
            return Err(invalid("too many decimal places"));
        }

        let magnitude: i64 = format!("{whole}{fraction}")
            .parse()
            .map_err(|_| invalid("amount out of range"))?;
        let amount = if negative { -magnitude } else { magnitude };

        Ok(Self {
            amount,
            symbol: Symbol::new(fraction.len() as u8, code.trim())?,
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.symbol.precision());
        let scale = 10u64.pow(precision as u32);
        let magnitude = self.amount.unsigned_abs();
        let sign = if self.amount < 0 { "-" } else { "" };

        write!(f, "{sign}{}", magnitude / scale)?;
        if precision > 0 {
            write!(f, ".{:0width$}", magnitude % scale, width = precision)?;
        }
        write!(f, " {}", self.symbol.code())
    }
}

impl Encode for Asset {
    fn encode(&self, out: &mut Vec<u8>) {
        self.amount.encode(out);
        self.symbol.encode(out);
    }
}

impl Decode for Asset {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            amount: i64::decode(input)?,
            symbol: Symbol::decode(input)?,
        })
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_encode_eos() {
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        assert_eq!(asset.amount, 10_000);
        assert_eq!(asset.symbol.precision(), 4);
        assert_eq!(asset.symbol.code(), "EOS");
        assert_eq!(hex::encode(asset.to_bytes()), "102700000000000004454f5300000000");
    }

    #[test]
    fn encode_custom_token() {
        let asset: Asset = "11.0000 TKN".parse().unwrap();
        assert_eq!(hex::encode(asset.to_bytes()), "b0ad01000000000004544b4e00000000");
    }

    #[test]
    fn display_roundtrip() {
        for s in ["1.0000 EOS", "0.0001 EOS", "-3.50 USD", "42 WAX", "0.000000001 LONGTOK"] {
            assert_eq!(s.parse::<Asset>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn symbol_display() {
        let symbol = Symbol::new(4, "EOS").unwrap();
        assert_eq!(symbol.to_string(), "4,EOS");
        assert_eq!(symbol.as_u64(), 0x534f_4504);
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", "1.0000", "1.0000 eos", "1. EOS", ".5 EOS", "1.2.3 EOS", "abc EOS", "1.0000 TOOLONGX"] {
            assert!(bad.parse::<Asset>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overflowing_amount() {
        assert!("99999999999999999999 EOS".parse::<Asset>().is_err());
    }

    #[test]
    fn rejects_excess_precision() {
        assert!(Symbol::new(19, "EOS").is_err());
        assert!("1.0000000000000000000 EOS".parse::<Asset>().is_err());
    }

    #[test]
    fn decode_roundtrip() {
        let asset: Asset = "-7.25 ABC".parse().unwrap();
        assert_eq!(Asset::from_bytes(&asset.to_bytes()).unwrap(), asset);
    }

    #[test]
    fn decode_rejects_garbage_after_terminator() {
        let mut bytes = Symbol::new(4, "EOS").unwrap().to_bytes();
        bytes[6] = b'X';
        assert!(Symbol::from_bytes(&bytes).is_err());
    }

    #[test]
    fn serde_as_string() {
        let asset: Asset = "20.1234 TKN".parse().unwrap();
        assert_eq!(serde_json::to_string(&asset).unwrap(), "\"20.1234 TKN\"");
    }
}

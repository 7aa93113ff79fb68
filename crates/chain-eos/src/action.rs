use graphene_codec::{CodecError, Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::error::EosError;
use crate::name::Name;

/// Longest memo accepted by the standard token contract.
pub const MAX_MEMO_LEN: usize = 256;

/// An `actor@permission` pair authorizing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

impl PermissionLevel {
    pub fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }
}

impl Encode for PermissionLevel {
    fn encode(&self, out: &mut Vec<u8>) {
        self.actor.encode(out);
        self.permission.encode(out);
    }
}

impl Decode for PermissionLevel {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            actor: Name::decode(input)?,
            permission: Name::decode(input)?,
        })
    }
}

/// A contract call. `data` is the contract's own encoding of its
/// arguments and is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    #[serde(with = "crate::hex_serde")]
    pub data: Vec<u8>,
}

impl Encode for Action {
    fn encode(&self, out: &mut Vec<u8>) {
        self.account.encode(out);
        self.name.encode(out);
        self.authorization.encode(out);
        self.data.encode(out);
    }
}

impl Decode for Action {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let account = Name::decode(input)?;
        let name = Name::decode(input)?;
        let authorization = Vec::<PermissionLevel>::decode(input)?;
        let data = Vec::<u8>::decode(input)?;
        Ok(Self {
            account,
            name,
            authorization,
            data,
        })
    }
}

/// Arguments of the standard `transfer` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Name,
    pub to: Name,
    pub quantity: Asset,
    pub memo: String,
}

impl Transfer {
    /// Wrap as an action on `token_contract`, authorized by
    /// `from@permission`.
    pub fn into_action(self, token_contract: Name, permission: Name) -> Action {
        Action {
            account: token_contract,
            name: Name::from_u64(TRANSFER_ACTION),
            authorization: vec![PermissionLevel::new(self.from, permission)],
            data: self.to_bytes(),
        }
    }
}

/// `"transfer"` as a packed name.
const TRANSFER_ACTION: u64 = 0xcdcd_3c2d_5700_0000;

impl Encode for Transfer {
    fn encode(&self, out: &mut Vec<u8>) {
        self.from.encode(out);
        self.to.encode(out);
        self.quantity.encode(out);
        self.memo.encode(out);
    }
}

impl Decode for Transfer {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            from: Name::decode(input)?,
            to: Name::decode(input)?,
            quantity: Asset::decode(input)?,
            memo: String::decode(input)?,
        })
    }
}

/// Build a token transfer action authorized by `from@active`.
pub fn build_transfer(
    token_contract: &str,
    from: &str,
    to: &str,
    quantity: &str,
    memo: &str,
) -> Result<Action, EosError> {
    if memo.len() > MAX_MEMO_LEN {
        return Err(EosError::TransactionBuildError(format!(
            "memo is {} bytes, limit is {MAX_MEMO_LEN}",
            memo.len()
        )));
    }

    let quantity: Asset = quantity.parse()?;
    if quantity.amount <= 0 {
        return Err(EosError::TransactionBuildError(
            "quantity must be positive".into(),
        ));
    }

    let transfer = Transfer {
        from: from.parse()?,
        to: to.parse()?,
        quantity,
        memo: memo.to_string(),
    };
    Ok(transfer.into_action(token_contract.parse()?, "active".parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_DATA_HEX: &str = "0000000080a920cd0000000000ea3055b0ad01000000000004544b4e000000000e546f6b656e207472616e73666572";

    fn sample_transfer() -> Action {
        build_transfer("eosio.token", "token", "eosio", "11.0000 TKN", "Token transfer").unwrap()
    }

    #[test]
    fn transfer_action_constant_matches_name() {
        assert_eq!(Name::from_u64(TRANSFER_ACTION).to_string(), "transfer");
    }

    #[test]
    fn transfer_data_encoding() {
        assert_eq!(hex::encode(&sample_transfer().data), TRANSFER_DATA_HEX);
    }

    #[test]
    fn transfer_action_encoding() {
        assert_eq!(
            hex::encode(sample_transfer().to_bytes()),
            format!(
                "00a6823403ea3055000000572d3ccdcd010000000080a920cd00000000a8ed32322f{TRANSFER_DATA_HEX}"
            )
        );
    }

    #[test]
    fn transfer_is_authorized_by_sender() {
        let action = sample_transfer();
        assert_eq!(action.authorization.len(), 1);
        assert_eq!(action.authorization[0].actor.to_string(), "token");
        assert_eq!(action.authorization[0].permission.to_string(), "active");
    }

    #[test]
    fn action_decode_roundtrip() {
        let action = sample_transfer();
        assert_eq!(Action::from_bytes(&action.to_bytes()).unwrap(), action);
    }

    #[test]
    fn transfer_data_decodes() {
        let transfer = Transfer::from_bytes(&sample_transfer().data).unwrap();
        assert_eq!(transfer.memo, "Token transfer");
        assert_eq!(transfer.quantity.to_string(), "11.0000 TKN");
    }

    #[test]
    fn opaque_data_is_untouched() {
        let action = Action {
            account: "hello".parse().unwrap(),
            name: "hi".parse().unwrap(),
            authorization: Vec::new(),
            data: vec![0xde, 0xad],
        };
        let bytes = action.to_bytes();
        assert_eq!(&bytes[16..], &[0x00, 0x02, 0xde, 0xad]);
    }

    #[test]
    fn rejects_long_memo() {
        let memo = "m".repeat(MAX_MEMO_LEN + 1);
        assert!(matches!(
            build_transfer("eosio.token", "alice", "bob", "1.0000 EOS", &memo),
            Err(EosError::TransactionBuildError(_))
        ));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert!(build_transfer("eosio.token", "alice", "bob", "0.0000 EOS", "").is_err());
        assert!(build_transfer("eosio.token", "alice", "bob", "-1.0000 EOS", "").is_err());
    }

    #[test]
    fn rejects_bad_account_name() {
        assert!(matches!(
            build_transfer("eosio.token", "Alice", "bob", "1.0000 EOS", ""),
            Err(EosError::InvalidName(_))
        ));
    }

    #[test]
    fn json_rendering() {
        let json = serde_json::to_value(sample_transfer()).unwrap();
        assert_eq!(json["account"], "eosio.token");
        assert_eq!(json["name"], "transfer");
        assert_eq!(json["authorization"][0]["actor"], "token");
        assert_eq!(json["data"], TRANSFER_DATA_HEX);
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample_transfer());
    }
}

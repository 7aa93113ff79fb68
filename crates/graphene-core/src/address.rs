use chain_bts::Address as BtsAddress;
use graphene_address::{
    Address, ChainProfile, Curve, EosAddress, Generation, PublicKeyBytes, SteemAddress,
};
use tracing::debug;

use crate::error::CoreError;
use crate::types::Chain;

/// Render the address of `public_key` on `chain`.
///
/// The key must be a 33-byte compressed point. Keys for the legacy and K1
/// generations are checked to lie on secp256k1.
pub fn derive_address(
    public_key: &[u8],
    chain: Chain,
    generation: Generation,
) -> Result<String, CoreError> {
    let key = PublicKeyBytes::try_from(public_key)?;
    if generation.curve() == Curve::K1 {
        key.to_k1()?;
    }

    Ok(match chain {
        Chain::Eos | Chain::Telos | Chain::Wax => render::<graphene_address::Eos>(&key, generation),
        Chain::Steem => render::<graphene_address::Steem>(&key, generation),
        Chain::Bitshares => BtsAddress::from_public_key(&key, generation).to_text(),
    })
}

fn render<P: ChainProfile>(key: &PublicKeyBytes, generation: Generation) -> String {
    Address::<P>::from_public_key(key, generation).to_text()
}

fn is_valid_on(text: &str, chain: Chain) -> bool {
    match chain {
        Chain::Eos | Chain::Telos | Chain::Wax => EosAddress::is_valid_text(text),
        Chain::Steem => SteemAddress::is_valid_text(text),
        Chain::Bitshares => BtsAddress::is_valid_text(text),
    }
}

/// Check `text` as an address on `chain`.
///
/// Returns `Ok(false)` for text that is not an address at all, and
/// [`CoreError::WrongChain`] for a well-formed address of another chain.
pub fn validate_address(text: &str, chain: Chain) -> Result<bool, CoreError> {
    if is_valid_on(text, chain) {
        return Ok(true);
    }

    if let Some(found) = Chain::ALL
        .into_iter()
        .find(|other| !other.shares_addresses_with(chain) && is_valid_on(text, *other))
    {
        debug!(%chain, %found, "address belongs to another chain");
        return Err(CoreError::WrongChain {
            expected: chain,
            found,
        });
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphene_address::AddressError;

    const DEV_KEY: &str = "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf";

    fn dev_key() -> Vec<u8> {
        hex::decode(DEV_KEY).unwrap()
    }

    #[test]
    fn derive_per_chain() {
        assert_eq!(
            derive_address(&dev_key(), Chain::Eos, Generation::Legacy).unwrap(),
            "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"
        );
        assert_eq!(
            derive_address(&dev_key(), Chain::Wax, Generation::Legacy).unwrap(),
            "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"
        );
        assert_eq!(
            derive_address(&dev_key(), Chain::Steem, Generation::Legacy).unwrap(),
            "STM6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"
        );
        assert_eq!(
            derive_address(&dev_key(), Chain::Bitshares, Generation::Legacy).unwrap(),
            "BTS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"
        );
        assert_eq!(
            derive_address(&dev_key(), Chain::Eos, Generation::ModernK1).unwrap(),
            "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63"
        );
    }

    #[test]
    fn derive_rejects_wrong_size() {
        assert!(matches!(
            derive_address(&[2u8; 32], Chain::Eos, Generation::Legacy),
            Err(CoreError::Address(AddressError::InvalidKeySize {
                expected: 33,
                actual: 32
            }))
        ));
    }

    #[test]
    fn derive_rejects_off_curve_k1_key() {
        let mut key = [0u8; 33];
        key[0] = 0x02;
        assert!(matches!(
            derive_address(&key, Chain::Eos, Generation::ModernK1),
            Err(CoreError::Address(AddressError::InvalidPublicKey(_)))
        ));
        assert!(derive_address(&key, Chain::Eos, Generation::ModernR1).is_ok());
    }

    #[test]
    fn validate_same_chain() {
        let text = derive_address(&dev_key(), Chain::Eos, Generation::Legacy).unwrap();
        assert_eq!(validate_address(&text, Chain::Eos), Ok(true));
        assert_eq!(validate_address(&text, Chain::Telos), Ok(true));
    }

    #[test]
    fn validate_reports_other_chain() {
        let text = derive_address(&dev_key(), Chain::Steem, Generation::Legacy).unwrap();
        assert_eq!(
            validate_address(&text, Chain::Eos),
            Err(CoreError::WrongChain {
                expected: Chain::Eos,
                found: Chain::Steem
            })
        );
    }

    #[test]
    fn modern_addresses_are_shared() {
        let text = derive_address(&dev_key(), Chain::Eos, Generation::ModernK1).unwrap();
        for chain in Chain::ALL {
            assert_eq!(validate_address(&text, chain), Ok(true));
        }
    }

    #[test]
    fn validate_garbage() {
        assert_eq!(validate_address("", Chain::Eos), Ok(false));
        assert_eq!(validate_address("EOS123", Chain::Bitshares), Ok(false));
        assert_eq!(
            validate_address("EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CW", Chain::Eos),
            Ok(false)
        );
    }
}

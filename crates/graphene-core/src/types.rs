use std::fmt;

use chain_eos::{EosChain, EOS_MAINNET, TELOS, WAX};
use graphene_address::{Bitshares, ChainProfile, Eos, Steem};
use serde::{Deserialize, Serialize};

/// Supported graphene-family networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Eos,
    Telos,
    Wax,
    Steem,
    Bitshares,
}

impl Chain {
    pub const ALL: [Chain; 5] = [
        Chain::Eos,
        Chain::Telos,
        Chain::Wax,
        Chain::Steem,
        Chain::Bitshares,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Eos => "EOS",
            Chain::Telos => "Telos",
            Chain::Wax => "WAX",
            Chain::Steem => "Steem",
            Chain::Bitshares => "Bitshares",
        }
    }

    /// Native token symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Eos => "EOS",
            Chain::Telos => "TLOS",
            Chain::Wax => "WAX",
            Chain::Steem => "STEEM",
            Chain::Bitshares => "BTS",
        }
    }

    /// Prefix of legacy addresses. EOSIO networks all keep `EOS`.
    pub fn legacy_prefix(&self) -> &'static str {
        match self {
            Chain::Eos | Chain::Telos | Chain::Wax => Eos::LEGACY_PREFIX,
            Chain::Steem => Steem::LEGACY_PREFIX,
            Chain::Bitshares => Bitshares::LEGACY_PREFIX,
        }
    }

    /// Network constants for EOSIO chains.
    pub fn eos_chain(&self) -> Option<&'static EosChain> {
        match self {
            Chain::Eos => Some(&EOS_MAINNET),
            Chain::Telos => Some(&TELOS),
            Chain::Wax => Some(&WAX),
            Chain::Steem | Chain::Bitshares => None,
        }
    }

    /// Whether two chains read addresses the same way.
    pub fn shares_addresses_with(&self, other: Chain) -> bool {
        self.legacy_prefix() == other.legacy_prefix()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

use serde::Serialize;

use crate::error::EosError;

/// Definition of an EOSIO-based network.
#[derive(Debug, Clone, Serialize)]
pub struct EosChain {
    /// Hex-encoded 32-byte chain id, mixed into every signing digest.
    pub chain_id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub precision: u8,
    pub token_contract: &'static str,
    pub is_testnet: bool,
}

impl EosChain {
    pub fn chain_id_bytes(&self) -> Result<[u8; 32], EosError> {
        parse_chain_id(self.chain_id)
    }
}

/// EOS mainnet.
pub const EOS_MAINNET: EosChain = EosChain {
    chain_id: "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906",
    name: "EOS",
    symbol: "EOS",
    precision: 4,
    token_contract: "eosio.token",
    is_testnet: false,
};

/// Jungle 4 testnet.
pub const JUNGLE_TESTNET: EosChain = EosChain {
    chain_id: "73e4385a2708e6d7048834fbc1079f2fabb17b3c125b146af438971e90716c4d",
    name: "Jungle 4",
    symbol: "EOS",
    precision: 4,
    token_contract: "eosio.token",
    is_testnet: true,
};

/// Telos mainnet.
pub const TELOS: EosChain = EosChain {
    chain_id: "4667b205c6838ef70ff7988f6e8257e8be0e1284a2f59699054a018f743b1d11",
    name: "Telos",
    symbol: "TLOS",
    precision: 4,
    token_contract: "eosio.token",
    is_testnet: false,
};

/// WAX mainnet.
pub const WAX: EosChain = EosChain {
    chain_id: "1064487b3cd1a897ce03ae5b6a865651747e2e152090f99c1d19d44e01aea5a4",
    name: "WAX",
    symbol: "WAX",
    precision: 8,
    token_contract: "eosio.token",
    is_testnet: false,
};

const ALL_CHAINS: &[&EosChain] = &[&EOS_MAINNET, &JUNGLE_TESTNET, &TELOS, &WAX];

/// Returns the chain with the given hex chain id, or `None` if unknown.
pub fn chain_by_id(chain_id: &str) -> Option<&'static EosChain> {
    let chain_id = chain_id.trim_start_matches("0x");
    ALL_CHAINS
        .iter()
        .find(|c| c.chain_id.eq_ignore_ascii_case(chain_id))
        .copied()
}

/// Returns all known chain definitions.
pub fn supported_chains() -> Vec<&'static EosChain> {
    ALL_CHAINS.to_vec()
}

/// Decode a hex chain id into the 32 bytes that prefix the signing digest.
pub fn parse_chain_id(chain_id: &str) -> Result<[u8; 32], EosError> {
    let bytes = hex::decode(chain_id.trim_start_matches("0x"))
        .map_err(|e| EosError::TransactionBuildError(format!("invalid chain id: {e}")))?;
    bytes.as_slice().try_into().map_err(|_| {
        EosError::TransactionBuildError(format!(
            "invalid chain id: expected 32 bytes, got {}",
            bytes.len()
        ))
    })
}

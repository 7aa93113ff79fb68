use std::fmt::Debug;
use std::hash::Hash;

use crate::generation::Generation;

/// Textual prefixes a chain uses for its public-key addresses.
///
/// Modern prefixes default to the EOSIO `PUB_<curve>_` convention; only the
/// legacy prefix varies between chains.
pub trait ChainProfile: Debug + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static {
    const NAME: &'static str;
    const LEGACY_PREFIX: &'static str;
    const MODERN_K1_PREFIX: &'static str = "PUB_K1_";
    const MODERN_R1_PREFIX: &'static str = "PUB_R1_";

    fn prefix(generation: Generation) -> &'static str {
        match generation {
            Generation::Legacy => Self::LEGACY_PREFIX,
            Generation::ModernK1 => Self::MODERN_K1_PREFIX,
            Generation::ModernR1 => Self::MODERN_R1_PREFIX,
        }
    }

    /// Resolve the generation of `text` by its prefix.
    ///
    /// The longest matching prefix wins, so a profile whose legacy prefix is
    /// itself a prefix of a modern one still classifies correctly.
    fn split_prefix(text: &str) -> Option<(Generation, &str)> {
        Generation::ALL
            .iter()
            .filter_map(|&generation| {
                let prefix = Self::prefix(generation);
                text.strip_prefix(prefix)
                    .map(|body| (generation, prefix.len(), body))
            })
            .max_by_key(|(_, prefix_len, _)| *prefix_len)
            .map(|(generation, _, body)| (generation, body))
    }
}

/// EOSIO mainnet and its forks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Eos;

impl ChainProfile for Eos {
    const NAME: &'static str = "EOS";
    const LEGACY_PREFIX: &'static str = "EOS";
}

/// Steem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Steem;

impl ChainProfile for Steem {
    const NAME: &'static str = "Steem";
    const LEGACY_PREFIX: &'static str = "STM";
}

/// Bitshares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitshares;

impl ChainProfile for Bitshares {
    const NAME: &'static str = "Bitshares";
    const LEGACY_PREFIX: &'static str = "BTS";
}

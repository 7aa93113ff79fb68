use serde::{Deserialize, Serialize};

/// Elliptic curve of a modern key or signature.
///
/// The curve name doubles as the checksum separator, so `K1` keys and
/// `K1` signatures share the same salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// secp256k1
    K1,
    /// secp256r1 (P-256)
    R1,
}

impl Curve {
    /// Bytes appended to the checksum input for this curve.
    pub fn separator(self) -> &'static [u8] {
        match self {
            Curve::K1 => b"K1",
            Curve::R1 => b"R1",
        }
    }

    /// Variant index used on the wire.
    pub fn index(self) -> u8 {
        match self {
            Curve::K1 => 0,
            Curve::R1 => 1,
        }
    }

    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Curve::K1),
            1 => Some(Curve::R1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Curve::K1 => write!(f, "K1"),
            Curve::R1 => write!(f, "R1"),
        }
    }
}

/// Address generation coexisting on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generation {
    /// Chain-specific prefix (`EOS`, `STM`, `BTS`), unsalted checksum.
    Legacy,
    /// `PUB_K1_` prefix, checksum salted with `"K1"`.
    ModernK1,
    /// `PUB_R1_` prefix, checksum salted with `"R1"`.
    ModernR1,
}

impl Generation {
    pub const ALL: [Generation; 3] = [
        Generation::Legacy,
        Generation::ModernK1,
        Generation::ModernR1,
    ];

    /// Curve of keys rendered in this generation. Legacy keys are secp256k1.
    pub fn curve(self) -> Curve {
        match self {
            Generation::Legacy | Generation::ModernK1 => Curve::K1,
            Generation::ModernR1 => Curve::R1,
        }
    }

    /// Domain separator mixed into the checksum hash.
    pub fn domain_separator(self) -> &'static [u8] {
        match self {
            Generation::Legacy => b"",
            Generation::ModernK1 => Curve::K1.separator(),
            Generation::ModernR1 => Curve::R1.separator(),
        }
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generation::Legacy => write!(f, "legacy"),
            Generation::ModernK1 => write!(f, "K1"),
            Generation::ModernR1 => write!(f, "R1"),
        }
    }
}

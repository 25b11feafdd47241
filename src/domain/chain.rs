//! Network identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An EIP-155 chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self(1);
    /// Kovan testnet.
    pub const KOVAN: Self = Self(42);
    /// Polygon PoS.
    pub const POLYGON: Self = Self(137);
    /// Polygon Mumbai testnet.
    pub const MUMBAI: Self = Self(80_001);

    /// Wraps a raw chain id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw chain id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

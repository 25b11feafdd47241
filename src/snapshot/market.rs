//! TOML market snapshot: prices and reserves in one document.
//!
//! ```toml
//! version = 4
//! chain_id = 137
//!
//! [prices]
//! EURUSD = "1.0834"
//!
//! [[pools]]
//! token_a = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
//! reserve_a = "1500000000000"
//! token_b = "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"
//! reserve_b = "2000000000000000000000000"
//!
//! [[pending]]
//! token_a = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
//! token_b = "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619"
//! ```

use std::collections::HashMap;
use std::path::Path;

use num_bigint::BigUint;
use serde::Deserialize;
use tracing::debug;

use super::{PriceSnapshot, ReserveSnapshot};
use crate::domain::{ChainId, FixedPointAmount, TokenAddress};
use crate::error::QuoteError;

const fn default_version() -> u64 {
    1
}

/// One pair with known reserves. Reserves are raw base-unit integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolEntry {
    token_a: TokenAddress,
    reserve_a: String,
    token_b: TokenAddress,
    reserve_b: String,
}

/// One pair whose reserves are still being fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingEntry {
    token_a: TokenAddress,
    token_b: TokenAddress,
}

/// A market document as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default = "default_version")]
    version: u64,
    chain_id: ChainId,
    #[serde(default)]
    prices: HashMap<String, FixedPointAmount>,
    #[serde(default)]
    pools: Vec<PoolEntry>,
    #[serde(default)]
    pending: Vec<PendingEntry>,
}

fn parse_reserve(text: &str) -> Result<BigUint, QuoteError> {
    text.trim()
        .parse::<BigUint>()
        .map_err(|_| QuoteError::InvalidNumberFormat("reserve must be a non-negative integer"))
}

impl MarketSnapshot {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Config`] if the document is malformed.
    pub fn from_toml_str(source: &str) -> Result<Self, QuoteError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`QuoteError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Returns the chain the reserves belong to.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Splits the document into the two snapshots, both at its version.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidNumberFormat`] if a reserve is not a
    /// non-negative integer.
    pub fn into_snapshots(self) -> Result<(PriceSnapshot, ReserveSnapshot), QuoteError> {
        let mut prices = PriceSnapshot::builder(self.version);
        for (key, price) in self.prices {
            prices.insert(key, price);
        }
        let prices = prices.build();

        let mut reserves = ReserveSnapshot::builder(self.version);
        for pool in &self.pools {
            reserves.insert(
                self.chain_id,
                pool.token_a,
                parse_reserve(&pool.reserve_a)?,
                pool.token_b,
                parse_reserve(&pool.reserve_b)?,
            );
        }
        for pair in &self.pending {
            reserves.mark_pending(self.chain_id, pair.token_a, pair.token_b);
        }
        let reserves = reserves.build();
        debug!(
            version = self.version,
            prices = prices.len(),
            pools = reserves.len(),
            pending = reserves.pending_count(),
            "loaded market snapshot"
        );
        Ok((prices, reserves))
    }
}

//! Top-level quoting configuration.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::NetworkConfig;
use crate::domain::{BasisPoints, ChainId, FixedPointAmount};
use crate::error::QuoteError;
use crate::routing::{BETTER_TRADE_LESS_HOPS_THRESHOLD, MAX_HOPS};

/// Network tables shipped with the crate.
const BUILTIN_NETWORKS: &str = include_str!("../../config/networks.toml");

/// Quoting defaults plus the per-chain routing contexts.
///
/// Every field has a default, so an empty document is a valid
/// configuration with no networks.
///
/// # Examples
///
/// ```
/// use exchange_quote::config::QuoteConfig;
///
/// let config = QuoteConfig::from_toml_str(r#"
///     max_hops = 2
///     slippage_bps = 100
/// "#).expect("valid config");
/// assert_eq!(config.max_hops(), 2);
/// assert_eq!(config.slippage().get(), 100);
/// assert_eq!(config.fee_percentage().to_string(), "0.002");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default = "default_max_hops")]
    max_hops: usize,
    #[serde(default = "default_multihop")]
    multihop: bool,
    #[serde(default = "default_slippage")]
    slippage_bps: BasisPoints,
    #[serde(default = "default_fee_percentage")]
    fee_percentage: FixedPointAmount,
    #[serde(default = "default_threshold")]
    better_trade_threshold_bps: BasisPoints,
    #[serde(default)]
    networks: Vec<NetworkConfig>,
}

const fn default_max_hops() -> usize {
    MAX_HOPS
}

const fn default_multihop() -> bool {
    true
}

const fn default_slippage() -> BasisPoints {
    BasisPoints::new(50)
}

fn default_fee_percentage() -> FixedPointAmount {
    // 0.2%
    FixedPointAmount::from_raw(2_000_000_000_000_000u64)
}

const fn default_threshold() -> BasisPoints {
    BETTER_TRADE_LESS_HOPS_THRESHOLD
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            multihop: default_multihop(),
            slippage_bps: default_slippage(),
            fee_percentage: default_fee_percentage(),
            better_trade_threshold_bps: default_threshold(),
            networks: Vec::new(),
        }
    }
}

impl QuoteConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::Config`] if the document is malformed.
    /// - [`QuoteError::InvalidConfiguration`] if [`validate`](Self::validate) fails.
    pub fn from_toml_str(source: &str) -> Result<Self, QuoteError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        debug!(networks = config.networks.len(), "loaded quote config");
        Ok(config)
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

    /// Returns the bundled mainnet, Kovan and Polygon configuration.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document itself is broken.
    pub fn builtin() -> Result<Self, QuoteError> {
        Self::from_toml_str(BUILTIN_NETWORKS)
    }

    /// Appends a network.
    #[must_use]
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.networks.push(network);
        self
    }

    /// Sets the hop budget.
    #[must_use]
    pub const fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Enables or disables multi-hop routing.
    #[must_use]
    pub const fn with_multihop(mut self, multihop: bool) -> Self {
        self.multihop = multihop;
        self
    }

    /// Sets the default slippage tolerance.
    #[must_use]
    pub const fn with_slippage(mut self, slippage: BasisPoints) -> Self {
        self.slippage_bps = slippage;
        self
    }

    /// Sets the protocol fee fraction.
    #[must_use]
    pub fn with_fee_percentage(mut self, fee: FixedPointAmount) -> Self {
        self.fee_percentage = fee;
        self
    }

    /// Sets the default multi-hop improvement threshold.
    #[must_use]
    pub const fn with_better_trade_threshold(mut self, threshold: BasisPoints) -> Self {
        self.better_trade_threshold_bps = threshold;
        self
    }

    /// Returns the configured hop budget.
    #[must_use]
    pub const fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Returns the hop budget actually searched: 1 when multi-hop is off.
    #[must_use]
    pub const fn effective_max_hops(&self) -> usize {
        if self.multihop {
            self.max_hops
        } else {
            1
        }
    }

    /// Returns `true` if multi-hop routing is enabled.
    #[must_use]
    pub const fn multihop(&self) -> bool {
        self.multihop
    }

    /// Returns the default slippage tolerance.
    #[must_use]
    pub const fn slippage(&self) -> BasisPoints {
        self.slippage_bps
    }

    /// Returns the protocol fee fraction (`0.002` = 0.2%).
    #[must_use]
    pub const fn fee_percentage(&self) -> &FixedPointAmount {
        &self.fee_percentage
    }

    /// Returns the default multi-hop improvement threshold.
    #[must_use]
    pub const fn better_trade_threshold(&self) -> BasisPoints {
        self.better_trade_threshold_bps
    }

    /// Returns all configured networks.
    #[must_use]
    pub fn networks(&self) -> &[NetworkConfig] {
        &self.networks
    }

    /// Returns the network for `chain_id`.
    #[must_use]
    pub fn network(&self, chain_id: ChainId) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.chain_id() == chain_id)
    }

    /// Returns the threshold that applies on `network`: its override if
    /// set, the global default otherwise.
    #[must_use]
    pub fn threshold_for(&self, network: &NetworkConfig) -> BasisPoints {
        network
            .better_trade_threshold()
            .unwrap_or(self.better_trade_threshold_bps)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidConfiguration`] if:
    /// - `max_hops` is zero;
    /// - the fee fraction is outside `[0, 1)`;
    /// - the slippage or threshold exceeds 100%;
    /// - two networks share a chain id, or any network is invalid.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.max_hops == 0 {
            return Err(QuoteError::InvalidConfiguration(
                "max_hops must be at least 1".to_owned(),
            ));
        }
        if self.fee_percentage.is_negative() || self.fee_percentage >= FixedPointAmount::one() {
            return Err(QuoteError::InvalidConfiguration(format!(
                "fee_percentage {} must be in [0, 1)",
                self.fee_percentage
            )));
        }
        if !self.slippage_bps.is_valid_percent() {
            return Err(QuoteError::InvalidConfiguration(format!(
                "slippage {} exceeds 100%",
                self.slippage_bps
            )));
        }
        if !self.better_trade_threshold_bps.is_valid_percent() {
            return Err(QuoteError::InvalidConfiguration(format!(
                "better trade threshold {} exceeds 100%",
                self.better_trade_threshold_bps
            )));
        }
        let mut chains = BTreeSet::new();
        for network in &self.networks {
            if !chains.insert(network.chain_id().get()) {
                return Err(QuoteError::InvalidConfiguration(format!(
                    "chain {} configured twice",
                    network.chain_id()
                )));
            }
            network.validate()?;
        }
        Ok(())
    }
}

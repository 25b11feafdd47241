//! Per-chain routing context.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{AssetDescriptor, AssetRole, BasisPoints, ChainId, Decimals, Token, TokenAddress};
use crate::error::QuoteError;
use crate::graph::{compute_pair_address, DEFAULT_PAIR_FEE};

/// A token listed in network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenEntry {
    symbol: String,
    address: TokenAddress,
    decimals: Decimals,
}

impl TokenEntry {
    /// Creates a token entry.
    #[must_use]
    pub fn new(symbol: impl Into<String>, address: TokenAddress, decimals: Decimals) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token on `chain_id`.
    #[must_use]
    pub const fn token(&self, chain_id: ChainId) -> Token {
        Token::new(chain_id, self.address, self.decimals)
    }
}

/// Extra or restricted bridge tokens for one specific token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseOverride {
    token: TokenAddress,
    bases: Vec<TokenEntry>,
}

impl BaseOverride {
    /// Creates an override for `token`.
    #[must_use]
    pub fn new(token: TokenAddress, bases: Vec<TokenEntry>) -> Self {
        Self { token, bases }
    }
}

/// Keccak-256 hash of the pair contract creation code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InitCodeHash([u8; 32]);

impl InitCodeHash {
    /// Wraps raw hash bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw hash bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses a `0x`-prefixed 64-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidConfiguration`] on malformed input.
    pub fn parse(input: &str) -> Result<Self, QuoteError> {
        let digits = input.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
            QuoteError::InvalidConfiguration(format!("init code hash {input:?}: {e}"))
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for InitCodeHash {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InitCodeHash> for String {
    fn from(value: InitCodeHash) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InitCodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for InitCodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InitCodeHash({self})")
    }
}

/// Routing context for one chain: AMM factory, bridge tokens, base
/// overrides and the protocol collateral.
///
/// # Examples
///
/// ```
/// use exchange_quote::config::NetworkConfig;
///
/// let network: NetworkConfig = toml::from_str(r#"
///     name = "polygon"
///     chain_id = 137
///     factory = "0x5757371414417b8C6CAad45bAeF941aBc7d3Ab32"
///     init_code_hash = "0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"
/// "#).expect("valid network");
/// assert_eq!(network.chain_id().get(), 137);
/// assert!(network.bridge_tokens().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkConfig {
    name: String,
    chain_id: ChainId,
    factory: TokenAddress,
    init_code_hash: InitCodeHash,
    #[serde(default = "default_pair_fee")]
    pair_fee_bps: BasisPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    better_trade_threshold_bps: Option<BasisPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collateral: Option<AssetDescriptor>,
    #[serde(default)]
    bridge_tokens: Vec<TokenEntry>,
    #[serde(default)]
    additional_bases: Vec<BaseOverride>,
    #[serde(default)]
    custom_bases: Vec<BaseOverride>,
}

const fn default_pair_fee() -> BasisPoints {
    DEFAULT_PAIR_FEE
}

impl NetworkConfig {
    /// Creates a network with no bridge tokens and no collateral.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        chain_id: ChainId,
        factory: TokenAddress,
        init_code_hash: InitCodeHash,
    ) -> Self {
        Self {
            name: name.into(),
            chain_id,
            factory,
            init_code_hash,
            pair_fee_bps: DEFAULT_PAIR_FEE,
            better_trade_threshold_bps: None,
            collateral: None,
            bridge_tokens: Vec::new(),
            additional_bases: Vec::new(),
            custom_bases: Vec::new(),
        }
    }

    /// Adds a common bridge token.
    #[must_use]
    pub fn with_bridge_token(mut self, entry: TokenEntry) -> Self {
        self.bridge_tokens.push(entry);
        self
    }

    /// Sets the protocol collateral.
    #[must_use]
    pub fn with_collateral(mut self, collateral: AssetDescriptor) -> Self {
        self.collateral = Some(collateral);
        self
    }

    /// Adds bridge tokens used whenever `token` is traded.
    #[must_use]
    pub fn with_additional_bases(mut self, over: BaseOverride) -> Self {
        self.additional_bases.push(over);
        self
    }

    /// Restricts which counterparts `token` may be paired with.
    #[must_use]
    pub fn with_custom_bases(mut self, over: BaseOverride) -> Self {
        self.custom_bases.push(over);
        self
    }

    /// Overrides the multi-hop improvement threshold on this chain.
    #[must_use]
    pub const fn with_better_trade_threshold(mut self, threshold: BasisPoints) -> Self {
        self.better_trade_threshold_bps = Some(threshold);
        self
    }

    /// Overrides the pair swap fee.
    #[must_use]
    pub const fn with_pair_fee(mut self, fee: BasisPoints) -> Self {
        self.pair_fee_bps = fee;
        self
    }

    /// Returns the network name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the AMM factory address.
    #[must_use]
    pub const fn factory(&self) -> TokenAddress {
        self.factory
    }

    /// Returns the pair init-code hash.
    #[must_use]
    pub const fn init_code_hash(&self) -> &InitCodeHash {
        &self.init_code_hash
    }

    /// Returns the swap fee charged by every pair on this chain.
    #[must_use]
    pub const fn pair_fee(&self) -> BasisPoints {
        self.pair_fee_bps
    }

    /// Returns the threshold override, if any.
    #[must_use]
    pub const fn better_trade_threshold(&self) -> Option<BasisPoints> {
        self.better_trade_threshold_bps
    }

    /// Returns the collateral descriptor, if configured.
    #[must_use]
    pub const fn collateral(&self) -> Option<&AssetDescriptor> {
        self.collateral.as_ref()
    }

    /// Returns the collateral token the AMM trades, if it has an address.
    #[must_use]
    pub fn collateral_token(&self) -> Option<Token> {
        self.collateral.as_ref().and_then(|c| c.token(self.chain_id))
    }

    /// Returns the common bridge tokens in configured order.
    #[must_use]
    pub fn bridge_tokens(&self) -> Vec<Token> {
        self.bridge_tokens
            .iter()
            .map(|e| e.token(self.chain_id))
            .collect()
    }

    /// Returns the additional bridge tokens configured for `token`.
    #[must_use]
    pub fn additional_bases(&self, token: &TokenAddress) -> Vec<Token> {
        self.additional_bases
            .iter()
            .filter(|o| o.token == *token)
            .flat_map(|o| o.bases.iter().map(|e| e.token(self.chain_id)))
            .collect()
    }

    /// Returns the counterparts `token` is restricted to, if restricted.
    #[must_use]
    pub fn custom_bases(&self, token: &TokenAddress) -> Option<Vec<Token>> {
        let mut matching = self.custom_bases.iter().filter(|o| o.token == *token).peekable();
        matching.peek()?;
        Some(
            matching
                .flat_map(|o| o.bases.iter().map(|e| e.token(self.chain_id)))
                .collect(),
        )
    }

    /// Returns the deterministic pair contract address for two tokens.
    #[must_use]
    pub fn pair_address(&self, a: &TokenAddress, b: &TokenAddress) -> TokenAddress {
        compute_pair_address(&self.factory, self.init_code_hash.as_bytes(), a, b)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidConfiguration`] if:
    /// - the name is empty;
    /// - the pair fee is 100% or more, or the threshold exceeds 100%;
    /// - the collateral descriptor does not have the collateral role;
    /// - a bridge token is listed twice.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::InvalidConfiguration(format!(
                "network {} has an empty name",
                self.chain_id
            )));
        }
        if self.pair_fee_bps >= BasisPoints::MAX_PERCENT {
            return Err(QuoteError::InvalidConfiguration(format!(
                "network {}: pair fee {} must be below 100%",
                self.name, self.pair_fee_bps
            )));
        }
        if let Some(threshold) = self.better_trade_threshold_bps {
            if !threshold.is_valid_percent() {
                return Err(QuoteError::InvalidConfiguration(format!(
                    "network {}: better trade threshold {threshold} exceeds 100%",
                    self.name
                )));
            }
        }
        if let Some(collateral) = &self.collateral {
            if collateral.role() != AssetRole::Collateral {
                return Err(QuoteError::InvalidConfiguration(format!(
                    "network {}: collateral {} must have the collateral role",
                    self.name,
                    collateral.symbol()
                )));
            }
        }
        let mut seen = BTreeSet::new();
        for entry in &self.bridge_tokens {
            if !seen.insert(entry.address) {
                return Err(QuoteError::InvalidConfiguration(format!(
                    "network {}: bridge token {} listed twice",
                    self.name, entry.address
                )));
            }
        }
        Ok(())
    }
}

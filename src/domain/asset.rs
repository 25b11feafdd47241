//! Asset metadata used by the exchange calculator.

use serde::{Deserialize, Serialize};

use super::{ChainId, Decimals, Token, TokenAddress};

/// What part an asset plays in an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    /// A protocol-issued synthetic, minted against collateral.
    Synthetic,
    /// The protocol collateral synthetics are minted and redeemed against.
    Collateral,
    /// Any other ERC-20 token, reachable only through an AMM.
    External,
    /// The chain's native coin, traded on the AMM through its wrapped token.
    NativeCoin,
}

impl AssetRole {
    /// Returns `true` if reaching this asset from the collateral needs an AMM hop.
    #[must_use]
    pub const fn needs_amm(&self) -> bool {
        matches!(self, Self::External | Self::NativeCoin)
    }
}

/// Describes one selectable asset.
///
/// `pair_key` names the price feed entry that prices the asset against the
/// collateral (for example `"EURUSD"`). `address` is the token the AMM
/// trades; for [`AssetRole::NativeCoin`] it is the wrapped token's address.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{AssetDescriptor, AssetRole, Decimals};
///
/// let jeur = AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic)
///     .with_pair_key("EURUSD");
/// assert_eq!(jeur.pair_key(), Some("EURUSD"));
/// assert!(!jeur.role().needs_amm());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDescriptor {
    symbol: String,
    decimals: Decimals,
    role: AssetRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pair_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<TokenAddress>,
}

impl AssetDescriptor {
    /// Creates a descriptor with no price key and no on-chain address.
    #[must_use]
    pub fn new(symbol: impl Into<String>, decimals: Decimals, role: AssetRole) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            role,
            pair_key: None,
            address: None,
        }
    }

    /// Sets the price feed key.
    #[must_use]
    pub fn with_pair_key(mut self, key: impl Into<String>) -> Self {
        self.pair_key = Some(key.into());
        self
    }

    /// Sets the token address the AMM trades for this asset.
    #[must_use]
    pub fn with_address(mut self, address: TokenAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the native decimal count.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns the asset role.
    #[must_use]
    pub const fn role(&self) -> AssetRole {
        self.role
    }

    /// Returns the price feed key, if any.
    #[must_use]
    pub fn pair_key(&self) -> Option<&str> {
        self.pair_key.as_deref()
    }

    /// Returns the AMM token address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<TokenAddress> {
        self.address
    }

    /// Returns the AMM token for this asset on `chain_id`.
    #[must_use]
    pub fn token(&self, chain_id: ChainId) -> Option<Token> {
        self.address
            .map(|address| Token::new(chain_id, address, self.decimals))
    }
}

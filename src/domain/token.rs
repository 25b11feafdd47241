//! Token identity type.

use serde::{Deserialize, Serialize};

use super::{ChainId, Decimals, TokenAddress};

/// The canonical identity of a token on a given chain.
///
/// Combines the chain id, the contract [`TokenAddress`], and its
/// [`Decimals`]. Two tokens are equal only if all three match, so the same
/// address on two networks never collapses into one graph node.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, Decimals, Token, TokenAddress};
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// let dec  = Decimals::new(6).expect("valid");
/// let tok  = Token::new(ChainId::POLYGON, addr, dec);
///
/// assert_eq!(tok.address(), addr);
/// assert_eq!(tok.decimals(), dec);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    chain_id: ChainId,
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(chain_id: ChainId, address: TokenAddress, decimals: Decimals) -> Self {
        Self {
            chain_id,
            address,
            decimals,
        }
    }

    /// Returns the chain this token lives on.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns `true` if `self` sorts before `other` in canonical pair order.
    #[must_use]
    pub fn sorts_before(&self, other: &Self) -> bool {
        self.address < other.address
    }
}

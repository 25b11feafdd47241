//! Ordered pair of distinct tokens.

use super::Token;
use crate::error::QuoteError;

/// An ordered pair of distinct tokens, canonically sorted by address.
///
/// The canonical ordering guarantees that `first().address() < second().address()`,
/// so `(A, B)` and `(B, A)` describe the same pool. This is the `token0` /
/// `token1` order pair contracts store their reserves in.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, Decimals, Token, TokenAddress, TokenPair};
///
/// let d = Decimals::new(18).expect("valid");
/// let tok_a = Token::new(ChainId::MAINNET, TokenAddress::from_bytes([1u8; 20]), d);
/// let tok_b = Token::new(ChainId::MAINNET, TokenAddress::from_bytes([2u8; 20]), d);
///
/// let pair = TokenPair::new(tok_b, tok_a).expect("distinct tokens");
/// assert_eq!(pair.first(), tok_a);
/// assert_eq!(pair.second(), tok_b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if both tokens have the same
    /// address or live on different chains.
    pub fn new(a: Token, b: Token) -> Result<Self, QuoteError> {
        if a.address() == b.address() {
            return Err(QuoteError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        if a.chain_id() != b.chain_id() {
            return Err(QuoteError::InvalidToken(
                "token pair requires tokens on the same chain",
            ));
        }

        let (token0, token1) = if a.sorts_before(&b) { (a, b) } else { (b, a) };
        Ok(Self { token0, token1 })
    }

    /// Returns the first token (lower address).
    #[must_use]
    pub const fn first(&self) -> Token {
        self.token0
    }

    /// Returns the second token (higher address).
    #[must_use]
    pub const fn second(&self) -> Token {
        self.token1
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Token) -> Result<Token, QuoteError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(QuoteError::InvalidToken("token is not part of this pair"))
        }
    }
}

//! A constant-product pair with known reserves.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::domain::{BasisPoints, Price, Token, TokenAddress, TokenAmount, TokenPair};
use crate::error::QuoteError;
use crate::math::{get_amount_in, get_amount_out};

/// Swap fee charged by Uniswap V2 and its forks (0.30%).
pub const DEFAULT_PAIR_FEE: BasisPoints = BasisPoints::new(30);

/// Two tokens in canonical order plus their raw reserves.
///
/// Reserves are stored in `token0` / `token1` order, each in its own
/// token's base units, exactly as `getReserves()` returns them.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, Decimals, Token, TokenAddress, TokenAmount, TokenPair};
/// use exchange_quote::graph::TradingPair;
///
/// let d = Decimals::new(18).expect("valid");
/// let a = Token::new(ChainId::POLYGON, TokenAddress::from_bytes([1u8; 20]), d);
/// let b = Token::new(ChainId::POLYGON, TokenAddress::from_bytes([2u8; 20]), d);
/// let pair = TradingPair::new(
///     TokenPair::new(a, b).expect("distinct"),
///     1_000_000u64.into(),
///     1_000_000u64.into(),
/// );
///
/// let out = pair.output_amount(&TokenAmount::new(a, 1_000u32)).expect("liquid");
/// assert_eq!(out.token(), b);
/// assert_eq!(out.raw().to_string(), "996");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradingPair {
    tokens: TokenPair,
    reserve0: BigUint,
    reserve1: BigUint,
    fee: BasisPoints,
    address: Option<TokenAddress>,
}

impl TradingPair {
    /// Creates a pair charging [`DEFAULT_PAIR_FEE`].
    #[must_use]
    pub fn new(tokens: TokenPair, reserve0: BigUint, reserve1: BigUint) -> Self {
        Self {
            tokens,
            reserve0,
            reserve1,
            fee: DEFAULT_PAIR_FEE,
            address: None,
        }
    }

    /// Overrides the swap fee.
    #[must_use]
    pub const fn with_fee(mut self, fee: BasisPoints) -> Self {
        self.fee = fee;
        self
    }

    /// Records the pair contract address.
    #[must_use]
    pub const fn with_address(mut self, address: TokenAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Returns the canonical token pair.
    #[must_use]
    pub const fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Returns the lower-address token.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.tokens.first()
    }

    /// Returns the higher-address token.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.tokens.second()
    }

    /// Returns the pair contract address, if known.
    #[must_use]
    pub const fn address(&self) -> Option<TokenAddress> {
        self.address
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Returns `true` if either reserve is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }

    /// Returns the reserve held for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `token` is not in the pair.
    pub fn reserve_of(&self, token: &Token) -> Result<&BigUint, QuoteError> {
        if *token == self.token0() {
            Ok(&self.reserve0)
        } else if *token == self.token1() {
            Ok(&self.reserve1)
        } else {
            Err(QuoteError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Token) -> Result<Token, QuoteError> {
        self.tokens.other(token)
    }

    /// Returns the spot price of `token` in the other token, from reserves.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidToken`] if `token` is not in the pair.
    /// - [`QuoteError::DivisionByZero`] if the reserve of `token` is zero.
    pub fn mid_price(&self, token: &Token) -> Result<Price, QuoteError> {
        let other = self.other(token)?;
        Price::from_amounts(
            &TokenAmount::new(*token, self.reserve_of(token)?.clone()),
            &TokenAmount::new(other, self.reserve_of(&other)?.clone()),
        )
    }

    /// Returns the amount received for selling exactly `input` into the pair.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidToken`] if `input` is not in one of the pair's tokens.
    /// - [`QuoteError::InsufficientReserves`] / [`QuoteError::InsufficientInputAmount`]
    ///   from the pricing formula.
    pub fn output_amount(&self, input: &TokenAmount) -> Result<TokenAmount, QuoteError> {
        let token_in = input.token();
        let token_out = self.other(&token_in)?;
        let out = get_amount_out(
            input.raw(),
            self.reserve_of(&token_in)?,
            self.reserve_of(&token_out)?,
            self.fee,
        )?;
        Ok(TokenAmount::new(token_out, out))
    }

    /// Returns the amount that must be sold to receive exactly `output`.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidToken`] if `output` is not in one of the pair's tokens.
    /// - [`QuoteError::InsufficientReserves`] / [`QuoteError::InsufficientInputAmount`]
    ///   from the pricing formula.
    pub fn input_amount(&self, output: &TokenAmount) -> Result<TokenAmount, QuoteError> {
        let token_out = output.token();
        let token_in = self.other(&token_out)?;
        let needed = get_amount_in(
            output.raw(),
            self.reserve_of(&token_in)?,
            self.reserve_of(&token_out)?,
            self.fee,
        )?;
        Ok(TokenAmount::new(token_in, needed))
    }
}

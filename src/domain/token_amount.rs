//! Raw token amount tied to its token.

use core::fmt;

use num_bigint::{BigUint, Sign};
use num_traits::Zero;

use super::{FixedPointAmount, Token};
use crate::error::QuoteError;

/// A non-negative amount of a specific token in its smallest unit.
///
/// This is the quantity pair contracts trade in: `1 USDC` is
/// `1_000_000` raw units. Conversion from a [`FixedPointAmount`] truncates
/// digits the token cannot represent.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, Decimals, FixedPointAmount, Token, TokenAddress, TokenAmount};
///
/// let usdc = Token::new(
///     ChainId::POLYGON,
///     TokenAddress::from_bytes([1u8; 20]),
///     Decimals::new(6).expect("valid"),
/// );
/// let amount = FixedPointAmount::parse("1.2345678").expect("valid");
/// let raw = TokenAmount::from_fixed_point(usdc, &amount).expect("non-negative");
/// assert_eq!(raw.raw().to_string(), "1234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    token: Token,
    raw: BigUint,
}

impl TokenAmount {
    /// Creates an amount from raw base units.
    #[must_use]
    pub fn new(token: Token, raw: impl Into<BigUint>) -> Self {
        Self {
            token,
            raw: raw.into(),
        }
    }

    /// Converts a fixed-point amount into this token's base units.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidNumberFormat`] if `amount` is negative.
    pub fn from_fixed_point(token: Token, amount: &FixedPointAmount) -> Result<Self, QuoteError> {
        let units = amount.to_units(token.decimals());
        match units.into_parts() {
            (Sign::Minus, _) => Err(QuoteError::InvalidNumberFormat(
                "token amounts cannot be negative",
            )),
            (_, magnitude) => Ok(Self {
                token,
                raw: magnitude,
            }),
        }
    }

    /// Returns the token this amount is denominated in.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Returns the raw base-unit quantity.
    #[must_use]
    pub const fn raw(&self) -> &BigUint {
        &self.raw
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Converts back to an 18-digit fixed-point amount.
    #[must_use]
    pub fn to_fixed_point(&self) -> FixedPointAmount {
        FixedPointAmount::from_units(self.raw.clone(), self.token.decimals())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.to_fixed_point(), self.token.address())
    }
}

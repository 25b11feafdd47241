//! Exact exchange rate between two tokens.

use core::cmp::Ordering;
use core::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::fixed_point::{ten_pow, SCALE_DIGITS};
use super::{FixedPointAmount, Token, TokenAmount};
use crate::error::QuoteError;

/// Price of `base` denominated in `quote`, kept as an exact ratio of raw
/// base units (`quote_raw / base_raw`).
///
/// Because both sides stay in raw units, two prices over the same token
/// pair compare exactly regardless of decimals. [`to_fixed_point`](Self::to_fixed_point)
/// applies the decimal adjustment for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Price {
    base: Token,
    quote: Token,
    ratio: BigRational,
}

impl Price {
    /// Builds the price implied by `base_raw` of `base` trading for
    /// `quote_raw` of `quote`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `base_raw` is zero.
    pub fn from_amounts(base: &TokenAmount, quote: &TokenAmount) -> Result<Self, QuoteError> {
        if base.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        Ok(Self {
            base: base.token(),
            quote: quote.token(),
            ratio: BigRational::new(to_signed(quote.raw()), to_signed(base.raw())),
        })
    }

    /// Identity price of a token in itself.
    #[must_use]
    pub fn identity(token: Token) -> Self {
        Self {
            base: token,
            quote: token,
            ratio: BigRational::one(),
        }
    }

    /// Returns the token being priced.
    #[must_use]
    pub const fn base(&self) -> Token {
        self.base
    }

    /// Returns the token the price is denominated in.
    #[must_use]
    pub const fn quote(&self) -> Token {
        self.quote
    }

    /// Returns the raw-unit ratio.
    #[must_use]
    pub const fn ratio(&self) -> &BigRational {
        &self.ratio
    }

    /// Chains two prices: `(A→B) × (B→C) = A→C`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `next` is not based on this
    /// price's quote token.
    pub fn multiply(&self, next: &Self) -> Result<Self, QuoteError> {
        if self.quote != next.base {
            return Err(QuoteError::InvalidToken("price chain does not connect"));
        }
        Ok(Self {
            base: self.base,
            quote: next.quote,
            ratio: &self.ratio * &next.ratio,
        })
    }

    /// Returns the reciprocal price.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if the price is zero.
    pub fn invert(&self) -> Result<Self, QuoteError> {
        if self.ratio.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        Ok(Self {
            base: self.quote,
            quote: self.base,
            ratio: self.ratio.recip(),
        })
    }

    /// Converts `amount` of the base token into the quote token, flooring.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `amount` is not in the base token.
    pub fn quote_amount(&self, amount: &TokenAmount) -> Result<TokenAmount, QuoteError> {
        if amount.token() != self.base {
            return Err(QuoteError::InvalidToken("amount is not in the base token"));
        }
        let quoted = (&self.ratio * BigRational::from_integer(to_signed(amount.raw()))).floor();
        Ok(TokenAmount::new(self.quote, to_unsigned(quoted.numer())))
    }

    /// Returns the decimal-adjusted value of one whole base token in whole
    /// quote tokens, truncated to 18 digits.
    #[must_use]
    pub fn to_fixed_point(&self) -> FixedPointAmount {
        let scaled = &self.ratio * BigRational::from_integer(self.base.decimals().unit())
            / BigRational::from_integer(self.quote.decimals().unit())
            * BigRational::from_integer(ten_pow(SCALE_DIGITS));
        FixedPointAmount::from_raw(scaled.trunc().to_integer())
    }

    /// Compares two prices over the same token pair.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::IncomparableTrades`] if the base or quote tokens differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, QuoteError> {
        if self.base != other.base || self.quote != other.quote {
            return Err(QuoteError::IncomparableTrades);
        }
        Ok(self.ratio.cmp(&other.ratio))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fixed_point())
    }
}

pub(crate) fn to_signed(value: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, value.clone())
}

pub(crate) fn to_unsigned(value: &BigInt) -> BigUint {
    value.magnitude().clone()
}

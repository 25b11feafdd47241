//! Token decimal places.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::fixed_point::{ten_pow, SCALE_DIGITS};
use crate::error::QuoteError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Represents the number of decimal places for a token amount.
///
/// Valid range is `0..=18`, matching the ERC-20 convention. Construction
/// is validated: values above 18 are rejected, including when decoded from
/// configuration.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert_eq!(d.unit().to_string(), "1000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, QuoteError> {
        if value > MAX_DECIMALS {
            return Err(QuoteError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals`, the number of base units in one whole token.
    #[must_use]
    pub fn unit(&self) -> BigInt {
        ten_pow(u32::from(self.0))
    }

    /// Returns `10^(18 - decimals)`, the factor between a token's base units
    /// and the 18-digit fixed-point scale.
    #[must_use]
    pub fn scale_gap(&self) -> BigInt {
        ten_pow(SCALE_DIGITS - u32::from(self.0))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = QuoteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}

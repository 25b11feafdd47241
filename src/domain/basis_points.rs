//! Basis-point representation for percentages.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use super::FixedPointAmount;

/// Value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used for slippage tolerance, pool swap fees, and the minimum improvement
/// a longer route needs over a shorter one. All `u32` values are accepted;
/// use [`is_valid_percent`](Self::is_valid_percent) to check the `0..=100%`
/// range.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::BasisPoints;
/// use num_bigint::BigUint;
///
/// let slippage = BasisPoints::new(50); // 0.5%
/// assert_eq!(slippage.widen(&BigUint::from(10_000u32)), BigUint::from(10_050u32));
/// assert_eq!(slippage.narrow(&BigUint::from(10_050u32)), BigUint::from(10_000u32));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `true` for zero basis points.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the exact fraction `self / 10_000`.
    #[must_use]
    pub fn as_ratio(&self) -> BigRational {
        BigRational::new(BigInt::from(self.0), BigInt::from(MAX_BPS))
    }

    /// Returns the exact fraction `1 + self / 10_000`.
    #[must_use]
    pub fn one_plus(&self) -> BigRational {
        BigRational::new(BigInt::from(MAX_BPS + self.0), BigInt::from(MAX_BPS))
    }

    /// Returns the fraction as a fixed-point amount (50 bp → `0.005`).
    #[must_use]
    pub fn to_fixed_point(&self) -> FixedPointAmount {
        FixedPointAmount::from_raw(BigInt::from(self.0) * BigInt::from(100_000_000_000_000u64))
    }

    /// Computes `floor(amount × (1 + self))`, the slippage-widened maximum
    /// an exact-output trade may spend.
    #[must_use]
    pub fn widen(&self, amount: &BigUint) -> BigUint {
        amount * BigUint::from(MAX_BPS + self.0) / BigUint::from(MAX_BPS)
    }

    /// Computes `floor(amount / (1 + self))`, the slippage-narrowed minimum
    /// an exact-input trade must return.
    #[must_use]
    pub fn narrow(&self, amount: &BigUint) -> BigUint {
        amount * BigUint::from(MAX_BPS) / BigUint::from(MAX_BPS + self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

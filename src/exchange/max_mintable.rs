//! Minting headroom of a liquidity position.
//!
//! A liquidity provider's position holds `total_collateral` against
//! `tokens_outstanding` synthetics. Minting more at `price` keeps the
//! position's collateral per token, so each new token locks
//! `total_collateral / tokens_outstanding - price` of the provider's free
//! balance on top of the user's payment.

use num_bigint::BigUint;

use crate::domain::{Decimals, FixedPointAmount};

/// How many synthetics `collateral_balance` can still back.
///
/// Returns `None` when nothing is outstanding or when the position's
/// collateral per token does not exceed `price`.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::FixedPointAmount;
/// use exchange_quote::exchange::max_mintable;
///
/// let d = |s: &str| FixedPointAmount::parse(s).expect("valid");
/// // 1200 collateral over 1000 tokens is 1.2 per token; at 1.1 each mint
/// // locks 0.1 of free balance.
/// let max = max_mintable(&d("50"), &d("1200"), &d("1000"), &d("1.1"));
/// assert_eq!(max, Some(d("500")));
///
/// assert_eq!(max_mintable(&d("50"), &d("1000"), &d("1000"), &d("1.1")), None);
/// ```
#[must_use]
pub fn max_mintable(
    collateral_balance: &FixedPointAmount,
    total_collateral: &FixedPointAmount,
    tokens_outstanding: &FixedPointAmount,
    price: &FixedPointAmount,
) -> Option<FixedPointAmount> {
    let per_token = total_collateral.checked_div(tokens_outstanding).ok()?;
    let headroom = &per_token - price;
    if headroom <= FixedPointAmount::zero() {
        return None;
    }
    collateral_balance.checked_div(&headroom).ok()
}

/// Position figures as read from chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityPosition {
    collateral_balance: FixedPointAmount,
    total_collateral: FixedPointAmount,
    tokens_outstanding: FixedPointAmount,
}

impl LiquidityPosition {
    /// Creates a position from whole-unit figures.
    #[must_use]
    pub const fn new(
        collateral_balance: FixedPointAmount,
        total_collateral: FixedPointAmount,
        tokens_outstanding: FixedPointAmount,
    ) -> Self {
        Self {
            collateral_balance,
            total_collateral,
            tokens_outstanding,
        }
    }

    /// Creates a position from raw contract values: collateral in the
    /// collateral's base units, the outstanding supply in 18-decimal units.
    #[must_use]
    pub fn from_units(
        balance_units: &BigUint,
        total_collateral_units: &BigUint,
        tokens_outstanding_raw: &BigUint,
        collateral_decimals: Decimals,
    ) -> Self {
        let collateral =
            |units: &BigUint| FixedPointAmount::from_units(units.clone(), collateral_decimals);
        Self {
            collateral_balance: collateral(balance_units),
            total_collateral: collateral(total_collateral_units),
            tokens_outstanding: FixedPointAmount::from_units(
                tokens_outstanding_raw.clone(),
                Decimals::MAX,
            ),
        }
    }

    /// Free collateral of the provider.
    #[must_use]
    pub const fn collateral_balance(&self) -> &FixedPointAmount {
        &self.collateral_balance
    }

    /// Collateral locked in the position.
    #[must_use]
    pub const fn total_collateral(&self) -> &FixedPointAmount {
        &self.total_collateral
    }

    /// Synthetics issued by the position.
    #[must_use]
    pub const fn tokens_outstanding(&self) -> &FixedPointAmount {
        &self.tokens_outstanding
    }

    /// See [`max_mintable`].
    #[must_use]
    pub fn max_mintable(&self, price: &FixedPointAmount) -> Option<FixedPointAmount> {
        max_mintable(
            &self.collateral_balance,
            &self.total_collateral,
            &self.tokens_outstanding,
            price,
        )
    }
}

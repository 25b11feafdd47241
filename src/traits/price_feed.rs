//! Oracle price source abstraction.

use crate::domain::FixedPointAmount;

/// Read-only source of synthetic asset prices.
///
/// Prices are quoted against the protocol collateral: `price("EURUSD")`
/// is the collateral value of one whole jEUR.
pub trait PriceFeed {
    /// Returns the latest price for `pair_key`, or `None` if it has not
    /// arrived yet.
    fn price(&self, pair_key: &str) -> Option<FixedPointAmount>;

    /// Monotonically increasing snapshot version.
    fn version(&self) -> u64;
}

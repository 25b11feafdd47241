//! In-memory oracle price snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::FixedPointAmount;
use crate::traits::PriceFeed;

/// Prices keyed by pair (`"EURUSD"`), tagged with the version of the feed
/// update they came from.
///
/// A built snapshot never changes. New prices arrive through
/// [`next`](Self::next), which always yields a higher version, so a quote
/// keyed on the version cannot outlive the prices it was computed from.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::FixedPointAmount;
/// use exchange_quote::snapshot::PriceSnapshot;
/// use exchange_quote::traits::PriceFeed;
///
/// let eur = FixedPointAmount::parse("1.10").expect("valid");
/// let prices = PriceSnapshot::builder(7).with_price("EURUSD", eur.clone()).build();
/// assert_eq!(prices.price("EURUSD"), Some(eur));
/// assert_eq!(prices.price("CHFUSD"), None);
/// assert_eq!(prices.version(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    version: u64,
    #[serde(default)]
    prices: HashMap<String, FixedPointAmount>,
}

impl PriceSnapshot {
    /// Creates an empty snapshot at `version`.
    #[must_use]
    pub fn new(version: u64) -> Self {
        Self {
            version,
            prices: HashMap::new(),
        }
    }

    /// Starts assembling the snapshot published as `version`.
    #[must_use]
    pub fn builder(version: u64) -> PriceSnapshotBuilder {
        PriceSnapshotBuilder {
            snapshot: Self::new(version),
        }
    }

    /// Returns a copy of this snapshot with `updates` applied and the
    /// version advanced by one.
    #[must_use]
    pub fn next<I, K>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (K, FixedPointAmount)>,
        K: Into<String>,
    {
        let mut next = self.clone();
        next.version = self.version.saturating_add(1);
        for (key, price) in updates {
            next.prices.insert(key.into(), price);
        }
        next
    }

    /// Number of prices held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns `true` if no price has arrived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceFeed for PriceSnapshot {
    fn price(&self, pair_key: &str) -> Option<FixedPointAmount> {
        self.prices.get(pair_key).cloned()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Collects the prices of one feed update before it is published.
#[derive(Debug, Clone)]
pub struct PriceSnapshotBuilder {
    snapshot: PriceSnapshot,
}

impl PriceSnapshotBuilder {
    /// Adds or replaces a price.
    #[must_use]
    pub fn with_price(mut self, pair_key: impl Into<String>, price: FixedPointAmount) -> Self {
        self.insert(pair_key, price);
        self
    }

    /// Adds or replaces a price, returning the old one.
    pub fn insert(
        &mut self,
        pair_key: impl Into<String>,
        price: FixedPointAmount,
    ) -> Option<FixedPointAmount> {
        self.snapshot.prices.insert(pair_key.into(), price)
    }

    /// Publishes the snapshot.
    #[must_use]
    pub fn build(self) -> PriceSnapshot {
        self.snapshot
    }
}

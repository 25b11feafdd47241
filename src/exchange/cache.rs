//! Caller-owned, input-keyed quote cache.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::{compute_exchange, ExchangeRequest, ExchangeResult};
use crate::config::{NetworkConfig, QuoteConfig};
use crate::domain::BasisPoints;
use crate::error::Result;
use crate::traits::{PriceFeed, ReserveLookup};

/// Entries kept by [`QuoteCache::new`].
pub const DEFAULT_CAPACITY: usize = 64;

/// Everything a quote depends on.
///
/// The request and network are held by value and compared in full on a
/// lookup. Market data is identified by snapshot version, which is sound
/// because a published snapshot never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    request: ExchangeRequest,
    network: NetworkConfig,
    price_version: u64,
    reserve_version: u64,
    threshold: BasisPoints,
}

impl QuoteKey {
    /// Builds the key for quoting `request` against these inputs.
    #[must_use]
    pub fn new(
        request: &ExchangeRequest,
        network: &NetworkConfig,
        config: &QuoteConfig,
        prices: &impl PriceFeed,
        reserves: &impl ReserveLookup,
    ) -> Self {
        Self {
            request: request.clone(),
            network: network.clone(),
            price_version: prices.version(),
            reserve_version: reserves.version(),
            threshold: config.threshold_for(network),
        }
    }

    /// The request the key was built for.
    #[must_use]
    pub const fn request(&self) -> &ExchangeRequest {
        &self.request
    }

    /// Version of the price snapshot the key was built against.
    #[must_use]
    pub const fn price_version(&self) -> u64 {
        self.price_version
    }

    /// Version of the reserve snapshot the key was built against.
    #[must_use]
    pub const fn reserve_version(&self) -> u64 {
        self.reserve_version
    }
}

/// Bounded read-through cache of [`compute_exchange`] results.
///
/// Entries are never updated in place. When a snapshot with a newer version
/// is seen, every entry built against an older one is dropped; quotes
/// computed against a snapshot older than the newest seen are returned but
/// not stored. Within one version the cache holds at most
/// [`capacity`](Self::capacity) entries and evicts the oldest first.
///
/// # Examples
///
/// ```
/// use exchange_quote::config::{InitCodeHash, NetworkConfig, QuoteConfig};
/// use exchange_quote::domain::{AssetDescriptor, AssetRole, ChainId, Decimals, FixedPointAmount, Side, TokenAddress};
/// use exchange_quote::exchange::{ExchangeRequest, QuoteCache};
/// use exchange_quote::snapshot::{PriceSnapshot, ReserveSnapshot};
///
/// let usdc = AssetDescriptor::new("USDC", Decimals::new(6).expect("valid"), AssetRole::Collateral);
/// let jeur = AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic).with_pair_key("EURUSD");
/// let network = NetworkConfig::new("polygon", ChainId::POLYGON, TokenAddress::zero(), InitCodeHash::from_bytes([0; 32]))
///     .with_collateral(usdc.clone());
/// let config = QuoteConfig::default();
/// let reserves = ReserveSnapshot::new(1);
/// let request = ExchangeRequest::new(Side::Pay, usdc, jeur, "100");
///
/// let mut cache = QuoteCache::new();
/// let v1 = PriceSnapshot::builder(1)
///     .with_price("EURUSD", FixedPointAmount::from_whole(1))
///     .build();
/// cache.quote(&request, &network, &config, &v1, &reserves).expect("parsable");
/// assert_eq!(cache.len(), 1);
///
/// let v2 = v1.next([("EURUSD", FixedPointAmount::from_whole(2))]);
/// let fresh = cache.quote(&request, &network, &config, &v2, &reserves).expect("parsable");
/// assert_eq!(fresh.receive_value().to_string(), "49.9");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuoteCache {
    entries: HashMap<QuoteKey, ExchangeResult>,
    order: VecDeque<QuoteKey>,
    capacity: usize,
    price_version: u64,
    reserve_version: u64,
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl QuoteCache {
    /// Creates an empty cache holding up to [`DEFAULT_CAPACITY`] quotes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding up to `capacity` quotes; zero is
    /// treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            price_version: 0,
            reserve_version: 0,
        }
    }

    /// Maximum number of quotes held.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached result for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &QuoteKey) -> Option<&ExchangeResult> {
        self.entries.get(key)
    }

    /// Returns the cached quote or computes and stores it.
    ///
    /// # Errors
    ///
    /// As [`compute_exchange`]. Errors are not cached.
    pub fn quote(
        &mut self,
        request: &ExchangeRequest,
        network: &NetworkConfig,
        config: &QuoteConfig,
        prices: &impl PriceFeed,
        reserves: &impl ReserveLookup,
    ) -> Result<ExchangeResult> {
        let key = QuoteKey::new(request, network, config, prices, reserves);
        self.observe(&key);
        if let Some(hit) = self.entries.get(&key) {
            trace!(price_version = key.price_version, "quote cache hit");
            return Ok(hit.clone());
        }

        let result = compute_exchange(request, network, config, prices, reserves)?;
        if self.is_current(&key) {
            self.store(key, result.clone());
        }
        Ok(result)
    }

    fn is_current(&self, key: &QuoteKey) -> bool {
        key.price_version == self.price_version && key.reserve_version == self.reserve_version
    }

    fn store(&mut self, key: QuoteKey, result: ExchangeResult) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, result);
    }

    fn observe(&mut self, key: &QuoteKey) {
        if key.price_version <= self.price_version && key.reserve_version <= self.reserve_version {
            return;
        }
        let prices = self.price_version.max(key.price_version);
        let reserves = self.reserve_version.max(key.reserve_version);
        self.price_version = prices;
        self.reserve_version = reserves;

        let before = self.entries.len();
        self.entries
            .retain(|k, _| k.price_version == prices && k.reserve_version == reserves);
        self.order
            .retain(|k| k.price_version == prices && k.reserve_version == reserves);
        debug!(
            price_version = prices,
            reserve_version = reserves,
            dropped = before - self.entries.len(),
            "quote cache advanced"
        );
    }

    /// Number of cached quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

//! In-memory pair reserve snapshot.

use std::collections::{HashMap, HashSet};

use num_bigint::BigUint;

use crate::domain::{ChainId, TokenAddress};
use crate::traits::{PoolLookup, ReserveLookup};

type PoolKey = (ChainId, TokenAddress, TokenAddress);

fn pool_key(chain_id: ChainId, a: &TokenAddress, b: &TokenAddress) -> PoolKey {
    if a <= b {
        (chain_id, *a, *b)
    } else {
        (chain_id, *b, *a)
    }
}

/// Reserves of known pairs plus the pairs whose fetch is still in flight.
///
/// Keys are order-insensitive; reserves are stored in canonical token order
/// whatever order they were inserted in. A pair that was never inserted or
/// marked pending is reported as [`PoolLookup::Missing`].
///
/// A built snapshot never changes; [`next`](Self::next) starts the following
/// version from its contents.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, TokenAddress};
/// use exchange_quote::snapshot::ReserveSnapshot;
/// use exchange_quote::traits::{PoolLookup, ReserveLookup};
///
/// let lo = TokenAddress::from_bytes([1; 20]);
/// let hi = TokenAddress::from_bytes([2; 20]);
/// let reserves = ReserveSnapshot::builder(1)
///     .with_reserves(ChainId::POLYGON, hi, 500u32, lo, 100u32)
///     .build();
///
/// assert_eq!(
///     reserves.lookup(ChainId::POLYGON, &lo, &hi),
///     PoolLookup::Found { reserve0: 100u32.into(), reserve1: 500u32.into() },
/// );
/// assert_eq!(reserves.lookup(ChainId::MAINNET, &lo, &hi), PoolLookup::Missing);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveSnapshot {
    version: u64,
    pools: HashMap<PoolKey, (BigUint, BigUint)>,
    pending: HashSet<PoolKey>,
}

impl ReserveSnapshot {
    /// Creates an empty snapshot at `version`.
    #[must_use]
    pub fn new(version: u64) -> Self {
        Self {
            version,
            pools: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// Starts assembling the snapshot published as `version`.
    #[must_use]
    pub fn builder(version: u64) -> ReserveSnapshotBuilder {
        ReserveSnapshotBuilder {
            snapshot: Self::new(version),
        }
    }

    /// Starts the next snapshot from this one's contents, one version up.
    #[must_use]
    pub fn next(&self) -> ReserveSnapshotBuilder {
        let mut snapshot = self.clone();
        snapshot.version = self.version.saturating_add(1);
        ReserveSnapshotBuilder { snapshot }
    }

    /// Number of pairs with known reserves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no reserves are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Number of pairs still being fetched.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl ReserveLookup for ReserveSnapshot {
    fn lookup(&self, chain_id: ChainId, a: &TokenAddress, b: &TokenAddress) -> PoolLookup {
        let key = pool_key(chain_id, a, b);
        if self.pending.contains(&key) {
            return PoolLookup::Pending;
        }
        match self.pools.get(&key) {
            Some((reserve0, reserve1)) => PoolLookup::Found {
                reserve0: reserve0.clone(),
                reserve1: reserve1.clone(),
            },
            None => PoolLookup::Missing,
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Collects pair reserves and pending pairs before they are published.
#[derive(Debug, Clone)]
pub struct ReserveSnapshotBuilder {
    snapshot: ReserveSnapshot,
}

impl ReserveSnapshotBuilder {
    /// Records the reserves of the `a` / `b` pair. `reserve_a` belongs to `a`.
    pub fn insert(
        &mut self,
        chain_id: ChainId,
        a: TokenAddress,
        reserve_a: impl Into<BigUint>,
        b: TokenAddress,
        reserve_b: impl Into<BigUint>,
    ) {
        let key = pool_key(chain_id, &a, &b);
        let (reserve_a, reserve_b) = (reserve_a.into(), reserve_b.into());
        let reserves = if a <= b {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        self.snapshot.pending.remove(&key);
        self.snapshot.pools.insert(key, reserves);
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with_reserves(
        mut self,
        chain_id: ChainId,
        a: TokenAddress,
        reserve_a: impl Into<BigUint>,
        b: TokenAddress,
        reserve_b: impl Into<BigUint>,
    ) -> Self {
        self.insert(chain_id, a, reserve_a, b, reserve_b);
        self
    }

    /// Marks the `a` / `b` pair as still being fetched.
    pub fn mark_pending(&mut self, chain_id: ChainId, a: TokenAddress, b: TokenAddress) {
        let key = pool_key(chain_id, &a, &b);
        self.snapshot.pools.remove(&key);
        self.snapshot.pending.insert(key);
    }

    /// Builder form of [`Self::mark_pending`].
    #[must_use]
    pub fn with_pending(mut self, chain_id: ChainId, a: TokenAddress, b: TokenAddress) -> Self {
        self.mark_pending(chain_id, a, b);
        self
    }

    /// Publishes the snapshot.
    #[must_use]
    pub fn build(self) -> ReserveSnapshot {
        self.snapshot
    }
}

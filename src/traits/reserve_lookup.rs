//! Pair reserve source abstraction.
//!
//! The graph never talks to a chain. It asks a [`ReserveLookup`] for the
//! reserves of each candidate pair and treats the answer as one of three
//! states:
//!
//! 1. **Pending**: the reserves have not been fetched yet.
//! 2. **Missing**: the factory has no pair for the two tokens.
//! 3. **Found**: the pair exists with the given reserves.

use num_bigint::BigUint;

use crate::domain::{ChainId, TokenAddress};

/// Answer to a single reserve query.
///
/// `reserve0` belongs to the lower of the two addresses, matching the pair
/// contract's `getReserves()` output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolLookup {
    /// The query is still in flight.
    Pending,
    /// No pair is deployed for these tokens.
    Missing,
    /// The pair exists.
    Found {
        /// Reserve of the lower-address token.
        reserve0: BigUint,
        /// Reserve of the higher-address token.
        reserve1: BigUint,
    },
}

/// Read-only source of pair reserves.
pub trait ReserveLookup {
    /// Returns the state of the pair for `a` / `b` on `chain_id`.
    ///
    /// Implementations must accept the addresses in either order.
    fn lookup(&self, chain_id: ChainId, a: &TokenAddress, b: &TokenAddress) -> PoolLookup;

    /// Monotonically increasing snapshot version.
    fn version(&self) -> u64;
}

//! Versioned in-memory market data.
//!
//! [`PriceSnapshot`] and [`ReserveSnapshot`] implement the
//! [`PriceFeed`](crate::traits::PriceFeed) and
//! [`ReserveLookup`](crate::traits::ReserveLookup) traits over plain maps.
//! Each carries the version of the update it was built from. A built
//! snapshot is immutable: contents are assembled through a builder, and a
//! refresh goes through `next`, which always yields a higher version.
//!
//! [`MarketSnapshot`] reads both from one TOML document.

mod market;
mod prices;
mod reserves;

pub use market::{MarketSnapshot, PendingEntry, PoolEntry};
pub use prices::{PriceSnapshot, PriceSnapshotBuilder};
pub use reserves::{ReserveSnapshot, ReserveSnapshotBuilder};

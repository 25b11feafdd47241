//! Collaborator traits for market data.
//!
//! The quoting core is pure: it reads oracle prices through [`PriceFeed`]
//! and pair reserves through [`ReserveLookup`]. Transport, polling and
//! caching of that data live with the caller; the in-memory snapshots in
//! [`crate::snapshot`] are the reference implementations.

mod price_feed;
mod reserve_lookup;

pub use price_feed::PriceFeed;
pub use reserve_lookup::{PoolLookup, ReserveLookup};

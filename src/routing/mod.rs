//! Route enumeration, trade pricing and best-trade selection.
//!
//! [`RouteFinder`] walks a [`TradingPairGraph`](crate::graph::TradingPairGraph)
//! and prices every simple path as a [`Trade`]. [`BestTradeSelector`] then
//! picks one trade per hop budget and only moves to a longer route when it
//! beats the shorter one by [`BETTER_TRADE_LESS_HOPS_THRESHOLD`].

mod best_trade;
mod route;
mod route_finder;
mod trade;

#[cfg(test)]
mod proptest_properties;

pub use best_trade::{
    is_trade_better, BestTradeSelector, BETTER_TRADE_LESS_HOPS_THRESHOLD, MAX_HOPS,
};
pub use route::Route;
pub use route_finder::RouteFinder;
pub use trade::{trade_comparator, Trade};

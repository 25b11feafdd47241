//! Constant-product pairs and the graph they form.
//!
//! # Building a graph
//!
//! ```text
//! all_currency_combinations(network, in, out)   candidate (A, B) pairs
//!         │
//!         ▼
//! pair_state(network, lookup, A, B)             Loading / NotExists / Exists / Invalid
//!         │
//!         ▼
//! TradingPairGraph                              token arena + deduplicated edges
//! ```
//!
//! Each existing pair carries its reserves, its swap fee and its `CREATE2`
//! address ([`compute_pair_address`]).

mod combinations;
mod pair;
mod pair_address;
mod trading_pair_graph;

pub use combinations::all_currency_combinations;
pub use pair::{TradingPair, DEFAULT_PAIR_FEE};
pub use pair_address::compute_pair_address;
pub use trading_pair_graph::{pair_state, PairState, TradingPairGraph};

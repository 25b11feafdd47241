//! Arena graph of tradable pairs.
//!
//! Tokens are interned into a `Vec` and referred to by index. Each pair is
//! an edge keyed by its sorted index pair, so inserting the same pair twice
//! is a no-op and iteration order is insertion order.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::combinations::all_currency_combinations;
use super::TradingPair;
use crate::config::NetworkConfig;
use crate::domain::{Token, TokenPair};
use crate::traits::{PoolLookup, ReserveLookup};

/// Resolution of one candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairState {
    /// Reserves are still being fetched.
    Loading,
    /// No pair is deployed for the two tokens.
    NotExists,
    /// The pair exists with known reserves.
    Exists(TradingPair),
    /// The two tokens cannot form a pair (same token, or different chains).
    Invalid,
}

/// Looks up the pair for `a` / `b` and wraps the answer in a [`PairState`].
pub fn pair_state(
    network: &NetworkConfig,
    lookup: &impl ReserveLookup,
    a: &Token,
    b: &Token,
) -> PairState {
    if a.chain_id() != network.chain_id() {
        return PairState::Invalid;
    }
    let Ok(tokens) = TokenPair::new(*a, *b) else {
        return PairState::Invalid;
    };
    match lookup.lookup(network.chain_id(), &a.address(), &b.address()) {
        PoolLookup::Pending => PairState::Loading,
        PoolLookup::Missing => PairState::NotExists,
        PoolLookup::Found { reserve0, reserve1 } => {
            let address = network.pair_address(&a.address(), &b.address());
            PairState::Exists(
                TradingPair::new(tokens, reserve0, reserve1)
                    .with_fee(network.pair_fee())
                    .with_address(address),
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edge {
    lo: usize,
    hi: usize,
    pair: TradingPair,
}

/// Tokens and the pairs connecting them.
///
/// Built once per quote from a reserve snapshot and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingPairGraph {
    tokens: Vec<Token>,
    index: HashMap<Token, usize>,
    edges: Vec<Edge>,
    keys: HashSet<(usize, usize)>,
    loading: bool,
}

impl TradingPairGraph {
    /// Creates an empty, fully loaded graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every candidate pair for a `token_in` → `token_out` trade
    /// and collects the existing ones.
    ///
    /// The graph is flagged as loading when any candidate is still
    /// [`PairState::Loading`]; pairs that did resolve are kept either way.
    #[must_use]
    pub fn build(
        network: &NetworkConfig,
        lookup: &impl ReserveLookup,
        token_in: &Token,
        token_out: &Token,
    ) -> Self {
        let mut graph = Self::new();
        for (a, b) in all_currency_combinations(network, token_in, token_out) {
            match pair_state(network, lookup, &a, &b) {
                PairState::Exists(pair) => {
                    graph.insert_pair(pair);
                }
                PairState::Loading => graph.loading = true,
                PairState::NotExists | PairState::Invalid => {}
            }
        }
        debug!(
            tokens = graph.token_count(),
            pairs = graph.pair_count(),
            loading = graph.loading,
            "built trading pair graph"
        );
        graph
    }

    /// Adds `pair` unless a pair over the same two tokens is present.
    ///
    /// Returns `true` if the pair was inserted.
    pub fn insert_pair(&mut self, pair: TradingPair) -> bool {
        let a = self.intern(pair.token0());
        let b = self.intern(pair.token1());
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if !self.keys.insert((lo, hi)) {
            return false;
        }
        self.edges.push(Edge { lo, hi, pair });
        true
    }

    fn intern(&mut self, token: Token) -> usize {
        if let Some(&i) = self.index.get(&token) {
            return i;
        }
        let i = self.tokens.len();
        self.tokens.push(token);
        self.index.insert(token, i);
        i
    }

    /// Returns `true` if any candidate pair is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the arena index of `token`.
    #[must_use]
    pub fn token_index(&self, token: &Token) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Returns the token stored at `index`.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    /// Returns the pair stored as edge `edge`.
    #[must_use]
    pub fn pair(&self, edge: usize) -> Option<&TradingPair> {
        self.edges.get(edge).map(|e| &e.pair)
    }

    /// Iterates over all pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = &TradingPair> {
        self.edges.iter().map(|e| &e.pair)
    }

    /// Iterates over `(edge, neighbour)` for every pair touching `node`,
    /// in insertion order.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().enumerate().filter_map(move |(i, e)| {
            if e.lo == node {
                Some((i, e.hi))
            } else if e.hi == node {
                Some((i, e.lo))
            } else {
                None
            }
        })
    }
}

//! Exhaustive route enumeration over a [`TradingPairGraph`].
//!
//! Routes are simple paths: no token and therefore no pair appears twice.
//! The search is depth-first and follows the graph's edge insertion order,
//! so a given graph always yields the same candidates in the same order.

use tracing::trace;

use super::{Route, Trade};
use crate::domain::{Token, TokenAmount};
use crate::error::QuoteError;
use crate::graph::TradingPairGraph;

/// Enumerates and prices routes between two tokens.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{ChainId, Decimals, Token, TokenAddress, TokenAmount, TokenPair};
/// use exchange_quote::graph::{TradingPair, TradingPairGraph};
/// use exchange_quote::routing::RouteFinder;
///
/// let t = |b: u8| Token::new(ChainId::POLYGON, TokenAddress::from_bytes([b; 20]), Decimals::MAX);
/// let mut graph = TradingPairGraph::new();
/// for (a, b) in [(1, 2), (2, 3), (1, 3)] {
///     let tokens = TokenPair::new(t(a), t(b)).expect("distinct");
///     graph.insert_pair(TradingPair::new(tokens, 1_000_000u32.into(), 1_000_000u32.into()));
/// }
///
/// let finder = RouteFinder::new(&graph);
/// let routes = finder.find_routes(&t(1), &t(3), 2).expect("connected");
/// assert_eq!(routes.len(), 2);
///
/// let trades = finder
///     .trades_exact_in(&TokenAmount::new(t(1), 1_000u32), &t(3), 2)
///     .expect("priced");
/// assert_eq!(trades[0].hops(), 2);
/// assert_eq!(trades[1].hops(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteFinder<'g> {
    graph: &'g TradingPairGraph,
}

impl<'g> RouteFinder<'g> {
    /// Creates a finder over `graph`.
    #[must_use]
    pub const fn new(graph: &'g TradingPairGraph) -> Self {
        Self { graph }
    }

    /// Returns every simple route from `input` to `output` with at most
    /// `max_hops` pairs, in depth-first order.
    ///
    /// # Errors
    ///
    /// Only fails if the graph is internally inconsistent.
    pub fn find_routes(
        &self,
        input: &Token,
        output: &Token,
        max_hops: usize,
    ) -> Result<Vec<Route>, QuoteError> {
        let mut found = Vec::new();
        let (Some(start), Some(target)) =
            (self.graph.token_index(input), self.graph.token_index(output))
        else {
            return Ok(found);
        };
        if start == target || max_hops == 0 {
            return Ok(found);
        }

        let mut visited = vec![false; self.graph.token_count()];
        visited[start] = true;
        let mut edges = Vec::with_capacity(max_hops);
        let mut paths = Vec::new();
        self.walk(start, target, max_hops, &mut visited, &mut edges, &mut paths);

        for path in paths {
            let pairs = path
                .iter()
                .map(|&e| {
                    self.graph
                        .pair(e)
                        .cloned()
                        .ok_or(QuoteError::InvalidToken("graph edge out of range"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            found.push(Route::new(pairs, *input)?);
        }
        Ok(found)
    }

    fn walk(
        &self,
        node: usize,
        target: usize,
        hops_left: usize,
        visited: &mut [bool],
        edges: &mut Vec<usize>,
        paths: &mut Vec<Vec<usize>>,
    ) {
        for (edge, next) in self.graph.neighbours(node) {
            if visited[next] {
                continue;
            }
            edges.push(edge);
            if next == target {
                paths.push(edges.clone());
            } else if hops_left > 1 {
                visited[next] = true;
                self.walk(next, target, hops_left - 1, visited, edges, paths);
                visited[next] = false;
            }
            edges.pop();
        }
    }

    /// Prices every route for selling exactly `amount_in`.
    ///
    /// Routes whose pairs cannot absorb the amount are skipped.
    ///
    /// # Errors
    ///
    /// Propagates pricing errors other than insufficient liquidity.
    pub fn trades_exact_in(
        &self,
        amount_in: &TokenAmount,
        output: &Token,
        max_hops: usize,
    ) -> Result<Vec<Trade>, QuoteError> {
        let routes = self.find_routes(&amount_in.token(), output, max_hops)?;
        let mut trades = Vec::with_capacity(routes.len());
        for route in routes {
            let hops = route.hops();
            match Trade::exact_in(route, amount_in.clone()) {
                Ok(trade) => {
                    trace!(hops, out = %trade.output(), "priced exact-in route");
                    trades.push(trade);
                }
                Err(e) if e.is_insufficient_liquidity() => {
                    trace!(hops, error = %e, "skipped exact-in route");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(trades)
    }

    /// Prices every route for buying exactly `amount_out`.
    ///
    /// Routes whose pairs cannot supply the amount are skipped.
    ///
    /// # Errors
    ///
    /// Propagates pricing errors other than insufficient liquidity.
    pub fn trades_exact_out(
        &self,
        input: &Token,
        amount_out: &TokenAmount,
        max_hops: usize,
    ) -> Result<Vec<Trade>, QuoteError> {
        let routes = self.find_routes(input, &amount_out.token(), max_hops)?;
        let mut trades = Vec::with_capacity(routes.len());
        for route in routes {
            let hops = route.hops();
            match Trade::exact_out(route, amount_out.clone()) {
                Ok(trade) => {
                    trace!(hops, input = %trade.input(), "priced exact-out route");
                    trades.push(trade);
                }
                Err(e) if e.is_insufficient_liquidity() => {
                    trace!(hops, error = %e, "skipped exact-out route");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(trades)
    }
}

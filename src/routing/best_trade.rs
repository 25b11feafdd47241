//! Hop-budgeted best trade selection.
//!
//! A longer route costs more gas and is more likely to fail, so it only
//! replaces a shorter one when its execution price is better by more than
//! a threshold:
//!
//! ```text
//! best = None
//! for h in 1..=max_hops:
//!     candidate = best trade with at most h hops
//!     if best.price × (1 + threshold) < candidate.price:
//!         best = candidate
//! ```

use core::cmp::Ordering;

use num_rational::BigRational;
use tracing::debug;

use super::{trade_comparator, RouteFinder, Trade};
use crate::domain::{BasisPoints, Token, TokenAmount};
use crate::error::QuoteError;
use crate::graph::TradingPairGraph;

/// Default hop budget.
pub const MAX_HOPS: usize = 3;

/// Improvement a longer route needs over a shorter one (0.5%).
pub const BETTER_TRADE_LESS_HOPS_THRESHOLD: BasisPoints = BasisPoints::new(50);

/// Decides whether `candidate` should replace `current`.
///
/// Returns `Ok(None)` when neither trade exists.
///
/// # Errors
///
/// Returns [`QuoteError::IncomparableTrades`] if the trades differ in trade
/// type, input token or output token.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::BasisPoints;
/// use exchange_quote::routing::is_trade_better;
///
/// assert_eq!(is_trade_better(None, None, BasisPoints::ZERO), Ok(None));
/// ```
pub fn is_trade_better(
    current: Option<&Trade>,
    candidate: Option<&Trade>,
    minimum_delta: BasisPoints,
) -> Result<Option<bool>, QuoteError> {
    let (current, candidate) = match (current, candidate) {
        (None, None) => return Ok(None),
        (Some(_), None) => return Ok(Some(false)),
        (None, Some(_)) => return Ok(Some(true)),
        (Some(a), Some(b)) => (a, b),
    };
    if current.trade_type() != candidate.trade_type()
        || current.input().token() != candidate.input().token()
        || current.output().token() != candidate.output().token()
    {
        return Err(QuoteError::IncomparableTrades);
    }

    let ordering = current
        .execution_price()
        .try_cmp(candidate.execution_price())?;
    if minimum_delta.is_zero() {
        return Ok(Some(ordering == Ordering::Less));
    }
    let raised: BigRational = current.execution_price().ratio() * minimum_delta.one_plus();
    Ok(Some(&raised < candidate.execution_price().ratio()))
}

fn best_of<'t>(trades: impl Iterator<Item = &'t Trade>) -> Option<&'t Trade> {
    trades.fold(None, |best, trade| match best {
        Some(b) if trade_comparator(trade, b) != Ordering::Less => Some(b),
        _ => Some(trade),
    })
}

/// Picks the best trade across hop budgets `1..=max_hops`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeSelector {
    max_hops: usize,
    threshold: BasisPoints,
}

impl Default for BestTradeSelector {
    fn default() -> Self {
        Self::new(MAX_HOPS, BETTER_TRADE_LESS_HOPS_THRESHOLD)
    }
}

impl BestTradeSelector {
    /// Creates a selector; a `max_hops` of zero is treated as one.
    #[must_use]
    pub const fn new(max_hops: usize, threshold: BasisPoints) -> Self {
        Self {
            max_hops: if max_hops == 0 { 1 } else { max_hops },
            threshold,
        }
    }

    /// Returns the hop budget.
    #[must_use]
    pub const fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Returns the multi-hop improvement threshold.
    #[must_use]
    pub const fn threshold(&self) -> BasisPoints {
        self.threshold
    }

    /// Returns the best trade selling exactly `amount_in` for `token_out`.
    ///
    /// # Errors
    ///
    /// Propagates pricing errors other than insufficient liquidity.
    pub fn best_trade_exact_in(
        &self,
        graph: &TradingPairGraph,
        amount_in: &TokenAmount,
        token_out: &Token,
    ) -> Result<Option<Trade>, QuoteError> {
        let trades = RouteFinder::new(graph).trades_exact_in(amount_in, token_out, self.max_hops)?;
        self.select(&trades)
    }

    /// Returns the best trade buying exactly `amount_out` with `token_in`.
    ///
    /// # Errors
    ///
    /// Propagates pricing errors other than insufficient liquidity.
    pub fn best_trade_exact_out(
        &self,
        graph: &TradingPairGraph,
        token_in: &Token,
        amount_out: &TokenAmount,
    ) -> Result<Option<Trade>, QuoteError> {
        let trades = RouteFinder::new(graph).trades_exact_out(token_in, amount_out, self.max_hops)?;
        self.select(&trades)
    }

    fn select(&self, trades: &[Trade]) -> Result<Option<Trade>, QuoteError> {
        if self.max_hops == 1 {
            return Ok(best_of(trades.iter()).cloned());
        }
        let mut best: Option<&Trade> = None;
        for hops in 1..=self.max_hops {
            let candidate = best_of(trades.iter().filter(|t| t.hops() <= hops));
            if is_trade_better(best, candidate, self.threshold)? == Some(true) {
                best = candidate;
            }
        }
        if let Some(trade) = best {
            debug!(
                hops = trade.hops(),
                input = %trade.input(),
                output = %trade.output(),
                "selected best trade"
            );
        }
        Ok(best.cloned())
    }
}

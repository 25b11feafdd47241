//! An ordered chain of pairs from one token to another.

use crate::domain::{Price, Token};
use crate::error::QuoteError;
use crate::graph::TradingPair;

/// A path through one or more pairs.
///
/// `path` lists every token visited, so `path.len() == pairs.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pairs: Vec<TradingPair>,
    path: Vec<Token>,
}

impl Route {
    /// Builds a route starting at `input` and walking through `pairs`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidToken`] if `pairs` is empty or
    /// consecutive pairs do not share a token.
    pub fn new(pairs: Vec<TradingPair>, input: Token) -> Result<Self, QuoteError> {
        if pairs.is_empty() {
            return Err(QuoteError::InvalidToken("route needs at least one pair"));
        }
        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(input);
        let mut current = input;
        for pair in &pairs {
            current = pair
                .other(&current)
                .map_err(|_| QuoteError::InvalidToken("route pairs do not connect"))?;
            path.push(current);
        }
        Ok(Self { pairs, path })
    }

    /// Returns the pairs in travel order.
    #[must_use]
    pub fn pairs(&self) -> &[TradingPair] {
        &self.pairs
    }

    /// Returns the visited tokens.
    #[must_use]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    /// Returns the number of pairs traversed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Returns the starting token.
    #[must_use]
    pub fn input(&self) -> Token {
        self.path[0]
    }

    /// Returns the final token.
    #[must_use]
    pub fn output(&self) -> Token {
        self.path[self.path.len() - 1]
    }

    /// Returns the product of the pairs' spot prices along the path.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if a pair has an empty reserve.
    pub fn mid_price(&self) -> Result<Price, QuoteError> {
        let mut price = Price::identity(self.input());
        for (pair, token) in self.pairs.iter().zip(&self.path) {
            price = price.multiply(&pair.mid_price(token)?)?;
        }
        Ok(price)
    }
}

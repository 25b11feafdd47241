//! A priced route.

use core::cmp::Ordering;

use num_rational::BigRational;
use num_traits::Zero;

use super::Route;
use crate::domain::{
    ten_pow, to_signed, BasisPoints, FixedPointAmount, Price, TokenAmount, TradeType, SCALE_DIGITS,
};
use crate::error::QuoteError;

/// The result of pushing an amount through a [`Route`].
///
/// For [`TradeType::ExactInput`] the input is fixed and the output is what
/// the pairs return. For [`TradeType::ExactOutput`] the output is fixed and
/// the input is what the pairs require, each hop rounded up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input: TokenAmount,
    output: TokenAmount,
    execution_price: Price,
    price_impact: BigRational,
}

impl Trade {
    /// Sells exactly `amount_in` along `route`.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidToken`] if `amount_in` is not in the route's input token.
    /// - [`QuoteError::InsufficientInputAmount`] / [`QuoteError::InsufficientReserves`]
    ///   if any hop cannot be priced.
    pub fn exact_in(route: Route, amount_in: TokenAmount) -> Result<Self, QuoteError> {
        if amount_in.token() != route.input() {
            return Err(QuoteError::InvalidToken("amount is not in the route input token"));
        }
        let mut current = amount_in.clone();
        for pair in route.pairs() {
            current = pair.output_amount(&current)?;
        }
        Self::priced(route, TradeType::ExactInput, amount_in, current)
    }

    /// Buys exactly `amount_out` along `route`, walking it backwards.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidToken`] if `amount_out` is not in the route's output token.
    /// - [`QuoteError::InsufficientInputAmount`] / [`QuoteError::InsufficientReserves`]
    ///   if any hop cannot be priced.
    pub fn exact_out(route: Route, amount_out: TokenAmount) -> Result<Self, QuoteError> {
        if amount_out.token() != route.output() {
            return Err(QuoteError::InvalidToken("amount is not in the route output token"));
        }
        let mut current = amount_out.clone();
        for pair in route.pairs().iter().rev() {
            current = pair.input_amount(&current)?;
        }
        Self::priced(route, TradeType::ExactOutput, current, amount_out)
    }

    fn priced(
        route: Route,
        trade_type: TradeType,
        input: TokenAmount,
        output: TokenAmount,
    ) -> Result<Self, QuoteError> {
        let execution_price = Price::from_amounts(&input, &output)?;
        let quoted = route.mid_price()?.ratio() * BigRational::from_integer(to_signed(input.raw()));
        let price_impact = if quoted.is_zero() {
            BigRational::zero()
        } else {
            (&quoted - BigRational::from_integer(to_signed(output.raw()))) / &quoted
        };
        Ok(Self {
            route,
            trade_type,
            input,
            output,
            execution_price,
            price_impact,
        })
    }

    /// Returns the route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Returns which side was fixed.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Returns the amount sold.
    #[must_use]
    pub const fn input(&self) -> &TokenAmount {
        &self.input
    }

    /// Returns the amount bought.
    #[must_use]
    pub const fn output(&self) -> &TokenAmount {
        &self.output
    }

    /// Returns output per unit of input, as an exact ratio.
    #[must_use]
    pub const fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// Returns the fraction of the mid-price quote lost to the curve and fees.
    #[must_use]
    pub const fn price_impact(&self) -> &BigRational {
        &self.price_impact
    }

    /// Returns the price impact as a fixed-point fraction (`0.01` = 1%),
    /// truncated.
    #[must_use]
    pub fn price_impact_fixed_point(&self) -> FixedPointAmount {
        let scaled = &self.price_impact * BigRational::from_integer(ten_pow(SCALE_DIGITS));
        FixedPointAmount::from_raw(scaled.trunc().to_integer())
    }

    /// Returns the number of hops.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.route.hops()
    }

    /// Returns the least output acceptable under `slippage`.
    ///
    /// Exact-output trades return their fixed output.
    #[must_use]
    pub fn minimum_amount_out(&self, slippage: BasisPoints) -> TokenAmount {
        match self.trade_type {
            TradeType::ExactOutput => self.output.clone(),
            TradeType::ExactInput => {
                TokenAmount::new(self.output.token(), slippage.narrow(self.output.raw()))
            }
        }
    }

    /// Returns the most input acceptable under `slippage`.
    ///
    /// Exact-input trades return their fixed input.
    #[must_use]
    pub fn maximum_amount_in(&self, slippage: BasisPoints) -> TokenAmount {
        match self.trade_type {
            TradeType::ExactInput => self.input.clone(),
            TradeType::ExactOutput => {
                TokenAmount::new(self.input.token(), slippage.widen(self.input.raw()))
            }
        }
    }
}

/// Ranks two trades over the same tokens; `Less` means `a` is preferred.
///
/// Higher output wins, then lower input, then lower price impact, then
/// fewer hops.
#[must_use]
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    b.output
        .raw()
        .cmp(a.output.raw())
        .then_with(|| a.input.raw().cmp(b.input.raw()))
        .then_with(|| a.price_impact.cmp(&b.price_impact))
        .then_with(|| a.hops().cmp(&b.hops()))
}

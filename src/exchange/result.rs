//! The figures a quote produces.

use serde::Serialize;

use super::DirectQuote;
use crate::domain::{FixedPointAmount, TokenAddress, TradeType};
use crate::routing::Trade;

/// Serializable outline of the AMM trade behind a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeSummary {
    trade_type: TradeType,
    path: Vec<TokenAddress>,
    input: FixedPointAmount,
    output: FixedPointAmount,
    execution_price: FixedPointAmount,
    price_impact: FixedPointAmount,
}

impl TradeSummary {
    /// Summarizes `trade`.
    #[must_use]
    pub fn of(trade: &Trade) -> Self {
        Self {
            trade_type: trade.trade_type(),
            path: trade.route().path().iter().map(|t| t.address()).collect(),
            input: trade.input().to_fixed_point(),
            output: trade.output().to_fixed_point(),
            execution_price: trade.execution_price().to_fixed_point(),
            price_impact: trade.price_impact_fixed_point(),
        }
    }

    /// Token addresses from input to output.
    #[must_use]
    pub fn path(&self) -> &[TokenAddress] {
        &self.path
    }

    /// Number of pairs traded through.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Price impact as a fraction.
    #[must_use]
    pub const fn price_impact(&self) -> &FixedPointAmount {
        &self.price_impact
    }
}

/// Outcome of one quote.
///
/// Every amount is in whole units of its asset. `fee` and the collateral
/// figures are in collateral. At most one side of the slippage guarantee is
/// set: the minimum pair when the pay amount was typed, the maximum pair
/// when the receive amount was.
///
/// A quote that cannot be computed yet has `is_loading` set. One whose AMM
/// leg has no route has `route_not_found` set. In both cases the amounts are
/// zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeResult {
    pay_value: FixedPointAmount,
    receive_value: FixedPointAmount,
    fee: FixedPointAmount,
    transaction_collateral: FixedPointAmount,
    gross_collateral: FixedPointAmount,
    net_collateral: FixedPointAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_receive_value: Option<FixedPointAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_synth_receive_value: Option<FixedPointAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_sent_value: Option<FixedPointAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_synth_sent_value: Option<FixedPointAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<FixedPointAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_price: Option<FixedPointAmount>,
    #[serde(rename = "route", skip_serializing_if = "Option::is_none")]
    summary: Option<TradeSummary>,
    #[serde(skip)]
    trade: Option<Trade>,
    is_loading: bool,
    route_not_found: bool,
}

impl Default for ExchangeResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExchangeResult {
    /// All-zero result with no flags.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pay_value: FixedPointAmount::zero(),
            receive_value: FixedPointAmount::zero(),
            fee: FixedPointAmount::zero(),
            transaction_collateral: FixedPointAmount::zero(),
            gross_collateral: FixedPointAmount::zero(),
            net_collateral: FixedPointAmount::zero(),
            minimum_receive_value: None,
            minimum_synth_receive_value: None,
            maximum_sent_value: None,
            maximum_synth_sent_value: None,
            rate: None,
            execution_price: None,
            summary: None,
            trade: None,
            is_loading: false,
            route_not_found: false,
        }
    }

    /// Result for inputs that are not available yet.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::empty()
        }
    }

    /// Result for an AMM leg with no route.
    #[must_use]
    pub fn no_route() -> Self {
        Self {
            route_not_found: true,
            ..Self::empty()
        }
    }

    pub(crate) fn from_direct(quote: &DirectQuote) -> Self {
        Self {
            pay_value: quote.pay().clone(),
            receive_value: quote.receive().clone(),
            fee: quote.fee().clone(),
            transaction_collateral: quote.transaction_collateral().clone(),
            gross_collateral: quote.gross_collateral().clone(),
            net_collateral: quote.net_collateral().clone(),
            ..Self::empty()
        }
    }

    pub(crate) fn with_pay(mut self, pay: FixedPointAmount) -> Self {
        self.pay_value = pay;
        self
    }

    pub(crate) fn with_receive(mut self, receive: FixedPointAmount) -> Self {
        self.receive_value = receive;
        self
    }

    pub(crate) fn with_minimums(
        mut self,
        receive: FixedPointAmount,
        synth: Option<FixedPointAmount>,
    ) -> Self {
        self.minimum_receive_value = Some(receive);
        self.minimum_synth_receive_value = synth;
        self
    }

    pub(crate) fn with_maximums(
        mut self,
        sent: FixedPointAmount,
        synth: Option<FixedPointAmount>,
    ) -> Self {
        self.maximum_sent_value = Some(sent);
        self.maximum_synth_sent_value = synth;
        self
    }

    pub(crate) fn with_rate(mut self, rate: Option<FixedPointAmount>) -> Self {
        self.rate = rate;
        self
    }

    pub(crate) fn with_trade(mut self, trade: Trade) -> Self {
        self.execution_price = Some(trade.execution_price().to_fixed_point());
        self.summary = Some(TradeSummary::of(&trade));
        self.trade = Some(trade);
        self
    }

    /// Amount paid.
    #[must_use]
    pub const fn pay_value(&self) -> &FixedPointAmount {
        &self.pay_value
    }

    /// Amount received.
    #[must_use]
    pub const fn receive_value(&self) -> &FixedPointAmount {
        &self.receive_value
    }

    /// Protocol fee in collateral.
    #[must_use]
    pub const fn fee(&self) -> &FixedPointAmount {
        &self.fee
    }

    /// Collateral the mint or redeem transaction carries.
    #[must_use]
    pub const fn transaction_collateral(&self) -> &FixedPointAmount {
        &self.transaction_collateral
    }

    /// Collateral before the fee.
    #[must_use]
    pub const fn gross_collateral(&self) -> &FixedPointAmount {
        &self.gross_collateral
    }

    /// Collateral after the fee.
    #[must_use]
    pub const fn net_collateral(&self) -> &FixedPointAmount {
        &self.net_collateral
    }

    /// Least AMM output accepted after slippage.
    #[must_use]
    pub const fn minimum_receive_value(&self) -> Option<&FixedPointAmount> {
        self.minimum_receive_value.as_ref()
    }

    /// Synthetics minted from [`Self::minimum_receive_value`].
    #[must_use]
    pub const fn minimum_synth_receive_value(&self) -> Option<&FixedPointAmount> {
        self.minimum_synth_receive_value.as_ref()
    }

    /// Most AMM input spent after slippage.
    #[must_use]
    pub const fn maximum_sent_value(&self) -> Option<&FixedPointAmount> {
        self.maximum_sent_value.as_ref()
    }

    /// Synthetics redeemed to cover [`Self::maximum_sent_value`].
    #[must_use]
    pub const fn maximum_synth_sent_value(&self) -> Option<&FixedPointAmount> {
        self.maximum_synth_sent_value.as_ref()
    }

    /// Receive units per pay unit.
    #[must_use]
    pub const fn rate(&self) -> Option<&FixedPointAmount> {
        self.rate.as_ref()
    }

    /// AMM execution price, output per input.
    #[must_use]
    pub const fn execution_price(&self) -> Option<&FixedPointAmount> {
        self.execution_price.as_ref()
    }

    /// The AMM trade, when one participates.
    #[must_use]
    pub const fn trade(&self) -> Option<&Trade> {
        self.trade.as_ref()
    }

    /// Serializable outline of [`Self::trade`].
    #[must_use]
    pub const fn trade_summary(&self) -> Option<&TradeSummary> {
        self.summary.as_ref()
    }

    /// Returns `true` while a price snapshot, pool reserve or collateral
    /// token is missing.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns `true` when an AMM leg is needed and no route serves it.
    #[must_use]
    pub const fn route_not_found(&self) -> bool {
        self.route_not_found
    }
}

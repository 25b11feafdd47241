//! Quote composition: prices, fee model and the optional AMM leg.
//!
//! ```text
//! typed amount ──parse──▶ RequestKind
//!                            │
//!         ┌──────────────────┼────────────────────┐
//!         ▼                  ▼                    ▼
//!   DirectExchange     Mint / Redeem       Mint / Redeem + AMM
//!   (DirectPricer)     (DirectPricer)      (graph → BestTradeSelector
//!                                            → DirectPricer)
//! ```
//!
//! Everything is recomputed from the inputs on every call. Parsing the typed
//! amount is the only failure a caller sees; missing prices, unfetched pools
//! and unroutable trades come back as flags on [`ExchangeResult`].

use tracing::{debug, warn};

use super::{truncate_to, DirectPricer, ExchangeRequest, ExchangeResult, RequestKind};
use crate::config::{NetworkConfig, QuoteConfig};
use crate::domain::{
    AssetDescriptor, AssetRole, ChainId, Decimals, FixedPointAmount, Side, Token, TokenAmount,
};
use crate::error::{QuoteError, Result};
use crate::graph::TradingPairGraph;
use crate::routing::{BestTradeSelector, Trade};
use crate::traits::{PriceFeed, ReserveLookup};

/// Computes one quote.
///
/// The hop budget and fee come from `request`; the multi-hop improvement
/// threshold comes from `config`, with `network`'s override taking
/// precedence.
///
/// # Errors
///
/// Returns [`QuoteError::InvalidNumberFormat`] if the typed amount does not
/// parse or is negative.
///
/// # Examples
///
/// ```
/// use exchange_quote::config::{InitCodeHash, NetworkConfig, QuoteConfig};
/// use exchange_quote::domain::{AssetDescriptor, AssetRole, ChainId, Decimals, FixedPointAmount, Side, TokenAddress};
/// use exchange_quote::exchange::{compute_exchange, ExchangeRequest};
/// use exchange_quote::snapshot::{PriceSnapshot, ReserveSnapshot};
///
/// let usdc = AssetDescriptor::new("USDC", Decimals::new(6).expect("valid"), AssetRole::Collateral);
/// let jeur = AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic).with_pair_key("EURUSD");
/// let network = NetworkConfig::new("polygon", ChainId::POLYGON, TokenAddress::zero(), InitCodeHash::from_bytes([0; 32]))
///     .with_collateral(usdc.clone());
/// let prices = PriceSnapshot::builder(1)
///     .with_price("EURUSD", FixedPointAmount::parse("1.25").expect("valid"))
///     .build();
///
/// let request = ExchangeRequest::new(Side::Pay, usdc, jeur, "100");
/// let result = compute_exchange(&request, &network, &QuoteConfig::default(), &prices, &ReserveSnapshot::new(1))
///     .expect("parsable amount");
/// assert_eq!(result.receive_value().to_string(), "79.84");
/// assert_eq!(result.fee().to_string(), "0.2");
/// ```
pub fn compute_exchange(
    request: &ExchangeRequest,
    network: &NetworkConfig,
    config: &QuoteConfig,
    prices: &impl PriceFeed,
    reserves: &impl ReserveLookup,
) -> Result<ExchangeResult> {
    let typed = FixedPointAmount::parse(request.amount())?;
    if typed.is_negative() {
        return Err(QuoteError::InvalidNumberFormat("amount cannot be negative"));
    }

    let kind = request.kind();
    debug!(
        %kind,
        base = %request.base(),
        amount = %typed,
        chain = %network.chain_id(),
        "computing exchange"
    );
    if kind == RequestKind::Unsupported {
        return Ok(ExchangeResult::empty());
    }

    let typed_asset = match request.base() {
        Side::Pay => request.pay_asset(),
        Side::Receive => request.receive_asset(),
    };
    let amount = truncate_to(&typed, typed_asset.decimals());
    if amount.is_zero() {
        return Ok(ExchangeResult::empty());
    }

    let quoter = Quoter {
        request,
        network,
        prices,
        reserves,
        amount,
        selector: BestTradeSelector::new(request.max_hops(), config.threshold_for(network)),
    };
    match quoter.run(kind) {
        Ok(result) => Ok(result),
        Err(e) if kind.has_amm_leg() && e.is_insufficient_liquidity() => {
            debug!(error = %e, "AMM leg cannot be served");
            Ok(ExchangeResult::no_route())
        }
        Err(e) => {
            warn!(%kind, error = %e, "quote could not be computed");
            Ok(ExchangeResult::empty())
        }
    }
}

/// Quotes against the configured networks of a [`QuoteConfig`].
///
/// Applies the configuration's fee, slippage and hop budget to each request
/// and picks the network by chain id.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeCalculator<'c> {
    config: &'c QuoteConfig,
}

impl<'c> ExchangeCalculator<'c> {
    /// Creates a calculator over `config`.
    #[must_use]
    pub const fn new(config: &'c QuoteConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &QuoteConfig {
        self.config
    }

    /// Quotes `request` on `chain_id`.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidConfiguration`] if no network has `chain_id`.
    /// - As [`compute_exchange`] otherwise.
    pub fn quote(
        &self,
        request: &ExchangeRequest,
        chain_id: ChainId,
        prices: &impl PriceFeed,
        reserves: &impl ReserveLookup,
    ) -> Result<ExchangeResult> {
        let network = self.config.network(chain_id).ok_or_else(|| {
            QuoteError::InvalidConfiguration(format!("no network configured for chain {chain_id}"))
        })?;
        let request = request.clone().with_config(self.config);
        compute_exchange(&request, network, self.config, prices, reserves)
    }
}

struct Quoter<'a, P, R> {
    request: &'a ExchangeRequest,
    network: &'a NetworkConfig,
    prices: &'a P,
    reserves: &'a R,
    amount: FixedPointAmount,
    selector: BestTradeSelector,
}

/// Collateral token, the AMM asset's token and the graph between them.
struct AmmContext {
    collateral: Token,
    external: Token,
    graph: TradingPairGraph,
}

impl<P: PriceFeed, R: ReserveLookup> Quoter<'_, P, R> {
    fn run(&self, kind: RequestKind) -> Result<ExchangeResult> {
        match kind {
            RequestKind::DirectExchange => self.exchange(),
            RequestKind::Mint { has_amm_leg: false } => self.mint(),
            RequestKind::Mint { has_amm_leg: true } => self.swap_and_mint(),
            RequestKind::Redeem { has_amm_leg: false } => self.redeem(),
            RequestKind::Redeem { has_amm_leg: true } => self.redeem_and_swap(),
            RequestKind::Unsupported => Ok(ExchangeResult::empty()),
        }
    }

    fn pay(&self) -> &AssetDescriptor {
        self.request.pay_asset()
    }

    fn receive(&self) -> &AssetDescriptor {
        self.request.receive_asset()
    }

    /// Collateral value of one whole unit of `asset`. Zero or negative
    /// prices are treated as not yet known.
    fn price_of(&self, asset: &AssetDescriptor) -> Option<FixedPointAmount> {
        let price = match asset.role() {
            AssetRole::Collateral => Some(FixedPointAmount::one()),
            AssetRole::Synthetic => asset.pair_key().and_then(|key| self.prices.price(key)),
            AssetRole::External | AssetRole::NativeCoin => None,
        };
        if price.is_none() {
            debug!(asset = asset.symbol(), "price not available");
        }
        price.filter(|p| p > &FixedPointAmount::zero())
    }

    fn pricer(&self, collateral_decimals: Decimals) -> DirectPricer {
        DirectPricer::new(self.request.fee_percentage().clone(), collateral_decimals)
    }

    // -- Without an AMM leg -------------------------------------------------

    fn exchange(&self) -> Result<ExchangeResult> {
        let (Some(pay_price), Some(receive_price)) =
            (self.price_of(self.pay()), self.price_of(self.receive()))
        else {
            return Ok(ExchangeResult::loading());
        };
        let Some(collateral) = self.network.collateral() else {
            warn!(network = self.network.name(), "network has no collateral asset");
            return Ok(ExchangeResult::loading());
        };
        let pricer = self.pricer(collateral.decimals());
        let quote = match self.request.base() {
            Side::Pay => pricer.exchange(&self.amount, &pay_price, &receive_price)?,
            Side::Receive => pricer.exchange_for(
                &self.amount,
                &pay_price,
                &receive_price,
                self.pay().decimals(),
            )?,
        };
        let rate = pay_price.checked_div(&receive_price).ok();
        Ok(ExchangeResult::from_direct(&quote).with_rate(rate))
    }

    fn mint(&self) -> Result<ExchangeResult> {
        let Some(price) = self.price_of(self.receive()) else {
            return Ok(ExchangeResult::loading());
        };
        let pricer = self.pricer(self.pay().decimals());
        let quote = match self.request.base() {
            Side::Pay => pricer.mint(&self.amount, &price)?,
            Side::Receive => pricer.mint_for(&self.amount, &price)?,
        };
        let rate = FixedPointAmount::one().checked_div(&price).ok();
        Ok(ExchangeResult::from_direct(&quote).with_rate(rate))
    }

    fn redeem(&self) -> Result<ExchangeResult> {
        let Some(price) = self.price_of(self.pay()) else {
            return Ok(ExchangeResult::loading());
        };
        let pricer = self.pricer(self.receive().decimals());
        let quote = match self.request.base() {
            Side::Pay => pricer.redeem(&self.amount, &price),
            Side::Receive => pricer.redeem_for(&self.amount, &price, self.pay().decimals())?,
        };
        Ok(ExchangeResult::from_direct(&quote).with_rate(Some(price)))
    }

    // -- With an AMM leg ----------------------------------------------------

    /// Builds the graph between `asset`'s AMM token and the collateral.
    /// `Err` carries the flagged result to return instead.
    fn amm_context(
        &self,
        asset: &AssetDescriptor,
        collateral_is_input: bool,
    ) -> core::result::Result<AmmContext, ExchangeResult> {
        let Some(collateral) = self.network.collateral_token() else {
            warn!(network = self.network.name(), "network has no collateral token");
            return Err(ExchangeResult::loading());
        };
        let Some(external) = asset.token(self.network.chain_id()) else {
            debug!(asset = asset.symbol(), "asset has no AMM token");
            return Err(ExchangeResult::no_route());
        };
        let (token_in, token_out) = if collateral_is_input {
            (collateral, external)
        } else {
            (external, collateral)
        };
        let graph = TradingPairGraph::build(self.network, self.reserves, &token_in, &token_out);
        if graph.is_loading() {
            return Err(ExchangeResult::loading());
        }
        Ok(AmmContext {
            collateral,
            external,
            graph,
        })
    }

    fn swap_and_mint(&self) -> Result<ExchangeResult> {
        let Some(price) = self.price_of(self.receive()) else {
            return Ok(ExchangeResult::loading());
        };
        let ctx = match self.amm_context(self.pay(), false) {
            Ok(ctx) => ctx,
            Err(flagged) => return Ok(flagged),
        };
        let pricer = self.pricer(ctx.collateral.decimals());
        let slippage = self.request.slippage();

        let (result, trade) = match self.request.base() {
            Side::Pay => {
                let amount_in = TokenAmount::from_fixed_point(ctx.external, &self.amount)?;
                let Some(trade) =
                    self.selector
                        .best_trade_exact_in(&ctx.graph, &amount_in, &ctx.collateral)?
                else {
                    return Ok(ExchangeResult::no_route());
                };
                let minted = pricer.mint(&trade.output().to_fixed_point(), &price)?;
                let minimum = trade.minimum_amount_out(slippage).to_fixed_point();
                let minimum_synth = pricer.mint(&minimum, &price)?;
                let result = ExchangeResult::from_direct(&minted)
                    .with_pay(trade.input().to_fixed_point())
                    .with_minimums(minimum, Some(minimum_synth.receive().clone()));
                (result, trade)
            }
            Side::Receive => {
                let minted = pricer.mint_for(&self.amount, &price)?;
                let amount_out = TokenAmount::from_fixed_point(ctx.collateral, minted.pay())?;
                let Some(trade) =
                    self.selector
                        .best_trade_exact_out(&ctx.graph, &ctx.external, &amount_out)?
                else {
                    return Ok(ExchangeResult::no_route());
                };
                let maximum = trade.maximum_amount_in(slippage).to_fixed_point();
                let result = ExchangeResult::from_direct(&minted)
                    .with_pay(trade.input().to_fixed_point())
                    .with_maximums(maximum, None);
                (result, trade)
            }
        };

        let rate = trade
            .execution_price()
            .to_fixed_point()
            .checked_div(&price)
            .ok();
        log_route(&trade);
        Ok(result.with_rate(rate).with_trade(trade))
    }

    fn redeem_and_swap(&self) -> Result<ExchangeResult> {
        let Some(price) = self.price_of(self.pay()) else {
            return Ok(ExchangeResult::loading());
        };
        let ctx = match self.amm_context(self.receive(), true) {
            Ok(ctx) => ctx,
            Err(flagged) => return Ok(flagged),
        };
        let pricer = self.pricer(ctx.collateral.decimals());
        let slippage = self.request.slippage();
        let pay_decimals = self.pay().decimals();

        let (result, trade) = match self.request.base() {
            Side::Pay => {
                let redeemed = pricer.redeem(&self.amount, &price);
                let amount_in = TokenAmount::from_fixed_point(ctx.collateral, redeemed.receive())?;
                let Some(trade) = self
                    .selector
                    .best_trade_exact_in(&ctx.graph, &amount_in, &ctx.external)?
                else {
                    return Ok(ExchangeResult::no_route());
                };
                let minimum = trade.minimum_amount_out(slippage).to_fixed_point();
                let result = ExchangeResult::from_direct(&redeemed)
                    .with_receive(trade.output().to_fixed_point())
                    .with_minimums(minimum, None);
                (result, trade)
            }
            Side::Receive => {
                let amount_out = TokenAmount::from_fixed_point(ctx.external, &self.amount)?;
                let Some(trade) =
                    self.selector
                        .best_trade_exact_out(&ctx.graph, &ctx.collateral, &amount_out)?
                else {
                    return Ok(ExchangeResult::no_route());
                };
                let redeemed =
                    pricer.redeem_for(&trade.input().to_fixed_point(), &price, pay_decimals)?;
                let maximum = trade.maximum_amount_in(slippage).to_fixed_point();
                let maximum_synth = pricer.redeem_for(&maximum, &price, pay_decimals)?;
                let result = ExchangeResult::from_direct(&redeemed)
                    .with_receive(trade.output().to_fixed_point())
                    .with_maximums(maximum, Some(maximum_synth.pay().clone()));
                (result, trade)
            }
        };

        let rate = Some(&price * &trade.execution_price().to_fixed_point());
        log_route(&trade);
        Ok(result.with_rate(rate).with_trade(trade))
    }
}

fn log_route(trade: &Trade) {
    debug!(
        hops = trade.hops(),
        input = %trade.input(),
        output = %trade.output(),
        "selected AMM route"
    );
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::InitCodeHash;
    use crate::domain::TokenAddress;
    use crate::snapshot::{PriceSnapshot, ReserveSnapshot};

    const USDC: u8 = 0x10;
    const WMATIC: u8 = 0x20;
    const WETH: u8 = 0x30;

    fn d(s: &str) -> FixedPointAmount {
        let Ok(v) = FixedPointAmount::parse(s) else {
            panic!("invalid test amount: {s}");
        };
        v
    }

    fn addr(byte: u8) -> TokenAddress {
        TokenAddress::from_bytes([byte; 20])
    }

    fn six() -> Decimals {
        let Ok(v) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        v
    }

    fn usdc() -> AssetDescriptor {
        AssetDescriptor::new("USDC", six(), AssetRole::Collateral).with_address(addr(USDC))
    }

    fn jeur() -> AssetDescriptor {
        AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic).with_pair_key("EURUSD")
    }

    fn jchf() -> AssetDescriptor {
        AssetDescriptor::new("jCHF", Decimals::MAX, AssetRole::Synthetic).with_pair_key("CHFUSD")
    }

    fn matic() -> AssetDescriptor {
        AssetDescriptor::new("MATIC", Decimals::MAX, AssetRole::NativeCoin).with_address(addr(WMATIC))
    }

    fn network() -> NetworkConfig {
        NetworkConfig::new(
            "test",
            ChainId::POLYGON,
            addr(0xff),
            InitCodeHash::from_bytes([0; 32]),
        )
        .with_collateral(usdc())
    }

    fn prices() -> PriceSnapshot {
        PriceSnapshot::builder(1)
            .with_price("EURUSD", d("1.10"))
            .with_price("CHFUSD", d("0.95"))
            .build()
    }

    /// 1 MATIC = 2 USDC, deep enough that small trades barely move it.
    fn reserves() -> ReserveSnapshot {
        ReserveSnapshot::builder(1)
            .with_reserves(
                ChainId::POLYGON,
                addr(WMATIC),
                1_000_000_000_000_000_000_000_000u128,
                addr(USDC),
                2_000_000_000_000u128,
            )
            .build()
    }

    fn quote(request: &ExchangeRequest, prices: &PriceSnapshot, reserves: &ReserveSnapshot) -> ExchangeResult {
        let Ok(result) = compute_exchange(request, &network(), &QuoteConfig::default(), prices, reserves) else {
            panic!("amount parses");
        };
        result
    }

    // -- Guards -------------------------------------------------------------

    #[test]
    fn unparsable_amount_is_the_only_error() {
        let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "1.2.3");
        assert!(matches!(
            compute_exchange(&request, &network(), &QuoteConfig::default(), &prices(), &reserves()),
            Err(QuoteError::InvalidNumberFormat(_))
        ));
        let negative = request.with_amount("-1");
        assert!(compute_exchange(&negative, &network(), &QuoteConfig::default(), &prices(), &reserves()).is_err());
    }

    #[test]
    fn zero_amount_short_circuits() {
        // a pending pool would flag loading if the graph were built
        let pending = ReserveSnapshot::builder(1)
            .with_pending(ChainId::POLYGON, addr(WMATIC), addr(USDC))
            .build();
        for base in [Side::Pay, Side::Receive] {
            let request = ExchangeRequest::new(base, matic(), jeur(), "0");
            let result = quote(&request, &prices(), &pending);
            assert_eq!(result, ExchangeResult::empty());
        }
    }

    #[test]
    fn unsupported_pair_is_empty() {
        let request = ExchangeRequest::new(Side::Pay, usdc(), matic(), "5");
        assert_eq!(quote(&request, &prices(), &reserves()), ExchangeResult::empty());
    }

    #[test]
    fn missing_price_flags_loading() {
        let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "5");
        let result = quote(&request, &PriceSnapshot::new(1), &reserves());
        assert!(result.is_loading());
        assert!(!result.route_not_found());
    }

    // -- Direct -------------------------------------------------------------

    #[test]
    fn direct_exchange_forward_and_rate() {
        let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "100")
            .with_fee_percentage(d("0.0015"));
        let result = quote(&request, &prices(), &reserves());
        assert_eq!(result.receive_value().format(None), "115.615789473684210526");
        assert_eq!(result.fee(), &d("0.165"));
        assert_eq!(result.transaction_collateral(), &d("110"));
        assert_eq!(result.rate().map(ToString::to_string), Some("1.157894736842105263".to_owned()));
        assert!(result.trade().is_none());
        assert!(result.minimum_receive_value().is_none());
    }

    #[test]
    fn direct_exchange_backward_reports_typed_receive() {
        let request = ExchangeRequest::new(Side::Receive, jeur(), jchf(), "50");
        let result = quote(&request, &prices(), &reserves());
        assert_eq!(result.receive_value(), &d("50"));
        assert!(result.pay_value() > &FixedPointAmount::zero());
        assert!(result.pay_value() < &d("50"));
    }

    #[test]
    fn mint_and_redeem_without_amm() {
        let mint = ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110");
        let minted = quote(&mint, &prices(), &reserves());
        assert_eq!(minted.fee(), &d("0.22"));
        assert_eq!(minted.receive_value(), &d("99.8"));
        assert_eq!(minted.transaction_collateral(), &d("109.78"));

        let redeem = ExchangeRequest::new(Side::Pay, jeur(), usdc(), "100");
        let redeemed = quote(&redeem, &prices(), &reserves());
        assert_eq!(redeemed.gross_collateral(), &d("110"));
        assert_eq!(redeemed.receive_value(), &d("109.78"));
        assert_eq!(redeemed.transaction_collateral(), &d("110"));
        assert_eq!(redeemed.rate(), Some(&d("1.10")));
    }

    #[test]
    fn typed_amount_truncated_to_asset_decimals() {
        let request = ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110.0000009");
        let result = quote(&request, &prices(), &reserves());
        assert_eq!(result.pay_value(), &d("110"));
    }

    // -- AMM legs -----------------------------------------------------------

    #[test]
    fn swap_and_mint_minimums_below_quote() {
        let request = ExchangeRequest::new(Side::Pay, matic(), jeur(), "10");
        let result = quote(&request, &prices(), &reserves());
        assert!(!result.is_loading());
        assert!(!result.route_not_found());
        let Some(trade) = result.trade() else {
            panic!("AMM leg priced");
        };
        assert_eq!(trade.hops(), 1);
        assert_eq!(result.pay_value(), &d("10"));
        let (Some(min), Some(min_synth)) =
            (result.minimum_receive_value(), result.minimum_synth_receive_value())
        else {
            panic!("minimums set");
        };
        assert!(min < &trade.output().to_fixed_point());
        assert!(min_synth < result.receive_value());
        assert!(result.maximum_sent_value().is_none());
    }

    #[test]
    fn swap_and_mint_backward_sets_maximum() {
        let request = ExchangeRequest::new(Side::Receive, matic(), jeur(), "10");
        let result = quote(&request, &prices(), &reserves());
        assert_eq!(result.receive_value(), &d("10"));
        let Some(max) = result.maximum_sent_value() else {
            panic!("maximum set");
        };
        assert!(max > result.pay_value());
        assert!(result.minimum_receive_value().is_none());
    }

    #[test]
    fn redeem_and_swap_both_directions() {
        let forward = ExchangeRequest::new(Side::Pay, jeur(), matic(), "10");
        let sold = quote(&forward, &prices(), &reserves());
        assert!(sold.receive_value() > &FixedPointAmount::zero());
        assert!(sold.minimum_receive_value().is_some());
        assert!(sold.rate().is_some());

        let backward = ExchangeRequest::new(Side::Receive, jeur(), matic(), "5");
        let bought = quote(&backward, &prices(), &reserves());
        assert_eq!(bought.receive_value(), &d("5"));
        let Some(max_synth) = bought.maximum_synth_sent_value() else {
            panic!("maximum synth set");
        };
        assert!(max_synth >= bought.pay_value());
    }

    #[test]
    fn pending_pool_flags_loading() {
        let pending = ReserveSnapshot::builder(1)
            .with_pending(ChainId::POLYGON, addr(WMATIC), addr(USDC))
            .build();
        let request = ExchangeRequest::new(Side::Pay, matic(), jeur(), "10");
        let result = quote(&request, &prices(), &pending);
        assert!(result.is_loading());
        assert!(!result.route_not_found());
    }

    #[test]
    fn no_pool_flags_route_not_found() {
        let weth = AssetDescriptor::new("WETH", Decimals::MAX, AssetRole::External).with_address(addr(WETH));
        let request = ExchangeRequest::new(Side::Pay, weth, jeur(), "1");
        let result = quote(&request, &prices(), &reserves());
        assert!(result.route_not_found());
        assert!(!result.is_loading());
    }

    #[test]
    fn missing_collateral_token_flags_loading() {
        let bare = NetworkConfig::new("bare", ChainId::POLYGON, addr(0xff), InitCodeHash::from_bytes([0; 32]));
        let request = ExchangeRequest::new(Side::Pay, matic(), jeur(), "10");
        let Ok(result) = compute_exchange(&request, &bare, &QuoteConfig::default(), &prices(), &reserves()) else {
            panic!("amount parses");
        };
        assert!(result.is_loading());
    }

    // -- Calculator ---------------------------------------------------------

    #[test]
    fn calculator_selects_network_by_chain() {
        let config = QuoteConfig::default().with_network(network());
        let calculator = ExchangeCalculator::new(&config);
        let request = ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110");
        let Ok(result) = calculator.quote(&request, ChainId::POLYGON, &prices(), &reserves()) else {
            panic!("network configured");
        };
        assert_eq!(result.receive_value(), &d("99.8"));
        assert!(matches!(
            calculator.quote(&request, ChainId::MAINNET, &prices(), &reserves()),
            Err(QuoteError::InvalidConfiguration(_))
        ));
    }
}

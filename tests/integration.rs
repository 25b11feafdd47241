//! Integration tests exercising the public API from configuration to quote.
//!
//! These tests drive [`compute_exchange`] and [`ExchangeCalculator`] through
//! every request shape, the best-trade threshold through a hand-built
//! graph, and the caller-side cache and session around them.

#![allow(clippy::panic)]

use exchange_quote::config::{InitCodeHash, NetworkConfig, QuoteConfig, TokenEntry};
use exchange_quote::domain::{
    AssetDescriptor, AssetRole, BasisPoints, ChainId, Decimals, FixedPointAmount, Side, Token,
    TokenAddress, TokenAmount, TokenPair,
};
use exchange_quote::exchange::{
    compute_exchange, DirectPricer, ExchangeCalculator, ExchangeRequest, ExchangeResult,
    QuoteCache, QuoteSession, RequestKind,
};
use exchange_quote::graph::{TradingPair, TradingPairGraph};
use exchange_quote::routing::BestTradeSelector;
use exchange_quote::snapshot::{MarketSnapshot, PriceSnapshot, ReserveSnapshot};
use num_bigint::BigUint;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const USDC: u8 = 0x10;
const WMATIC: u8 = 0x20;
const WETH: u8 = 0x30;
const UNLISTED: u8 = 0x40;

fn d(s: &str) -> FixedPointAmount {
    let Ok(v) = FixedPointAmount::parse(s) else {
        panic!("invalid test amount: {s}");
    };
    v
}

fn addr(byte: u8) -> TokenAddress {
    TokenAddress::from_bytes([byte; 20])
}

fn decimals(n: u8) -> Decimals {
    let Ok(v) = Decimals::new(n) else {
        panic!("valid decimals");
    };
    v
}

fn usdc() -> AssetDescriptor {
    AssetDescriptor::new("USDC", decimals(6), AssetRole::Collateral).with_address(addr(USDC))
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

fn weth() -> AssetDescriptor {
    AssetDescriptor::new("WETH", Decimals::MAX, AssetRole::External).with_address(addr(WETH))
}

fn unlisted() -> AssetDescriptor {
    AssetDescriptor::new("XYZ", Decimals::MAX, AssetRole::External).with_address(addr(UNLISTED))
}

fn network() -> NetworkConfig {
    NetworkConfig::new(
        "testnet",
        ChainId::POLYGON,
        addr(0xff),
        InitCodeHash::from_bytes([0; 32]),
    )
    .with_collateral(usdc())
    .with_bridge_token(TokenEntry::new("WETH", addr(WETH), Decimals::MAX))
}

fn prices() -> PriceSnapshot {
    PriceSnapshot::builder(1)
        .with_price("EURUSD", d("1.10"))
        .with_price("CHFUSD", d("0.95"))
        .build()
}

/// 1 MATIC = 2 USDC and 1 WETH = 2000 USDC, both deep.
fn reserves() -> ReserveSnapshot {
    ReserveSnapshot::builder(1)
        .with_reserves(
            ChainId::POLYGON,
            addr(WMATIC),
            1_000_000_000_000_000_000_000_000u128,
            addr(USDC),
            2_000_000_000_000u128,
        )
        .with_reserves(
            ChainId::POLYGON,
            addr(WETH),
            1_000_000_000_000_000_000_000u128,
            addr(USDC),
            2_000_000_000_000u128,
        )
        .build()
}

fn quote(request: &ExchangeRequest) -> ExchangeResult {
    quote_with(request, &prices(), &reserves())
}

fn quote_with(
    request: &ExchangeRequest,
    prices: &PriceSnapshot,
    reserves: &ReserveSnapshot,
) -> ExchangeResult {
    let Ok(result) = compute_exchange(request, &network(), &QuoteConfig::default(), prices, reserves)
    else {
        panic!("amount parses");
    };
    result
}

// ---------------------------------------------------------------------------
// Fixed-point amounts
// ---------------------------------------------------------------------------

#[test]
fn parse_then_format_truncates() {
    let amount = d("1.005");
    assert_eq!(amount.raw().to_string(), "1005000000000000000");
    assert_eq!(amount.format(Some(2)), "1.00");
}

// ---------------------------------------------------------------------------
// Direct exchange
// ---------------------------------------------------------------------------

#[test]
fn direct_exchange_reference_figures() {
    let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "100")
        .with_fee_percentage(d("0.0015"));
    assert_eq!(request.kind(), RequestKind::DirectExchange);

    let result = quote(&request);
    // 100 × 1.10 / 0.95 = 115.789473684210526315..., less 0.15%
    assert_eq!(result.receive_value().format(None), "115.615789473684210526");
    assert_eq!(result.fee(), &d("0.165"));
    assert_eq!(result.pay_value(), &d("100"));
    assert!(result.execution_price().is_none());
    assert!(result.trade_summary().is_none());
}

#[test]
fn direct_exchange_backward_pays_no_more_than_needed() {
    let request = ExchangeRequest::new(Side::Receive, jeur(), jchf(), "115.615789473684210526")
        .with_fee_percentage(d("0.0015"));
    let result = quote(&request);
    assert_eq!(result.receive_value(), &d("115.615789473684210526"));
    assert!(result.pay_value() <= &d("100"));
    assert!(result.pay_value() > &d("99.99"));
}

// ---------------------------------------------------------------------------
// Mint and redeem
// ---------------------------------------------------------------------------

#[test]
fn mint_and_redeem_against_collateral() {
    let minted = quote(&ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110"));
    assert_eq!(minted.receive_value(), &d("99.8"));
    assert_eq!(minted.fee(), &d("0.22"));

    let redeemed = quote(&ExchangeRequest::new(Side::Pay, jeur(), usdc(), "100"));
    assert_eq!(redeemed.receive_value(), &d("109.78"));
    assert_eq!(redeemed.gross_collateral(), &d("110"));
}

#[test]
fn swap_and_mint_minimum_matches_slippage_bounded_trade() {
    let request = ExchangeRequest::new(Side::Pay, matic(), jeur(), "10")
        .with_slippage(BasisPoints::new(50));
    let result = quote(&request);

    let Some(trade) = result.trade() else {
        panic!("AMM leg priced");
    };
    assert_eq!(trade.hops(), 1);

    let minimum = trade.minimum_amount_out(BasisPoints::new(50)).to_fixed_point();
    assert_eq!(result.minimum_receive_value(), Some(&minimum));

    let pricer = DirectPricer::new(d("0.002"), decimals(6));
    let Ok(implied) = pricer.mint(&minimum, &d("1.10")) else {
        panic!("price is positive");
    };
    let Some(minimum_synth) = result.minimum_synth_receive_value() else {
        panic!("minimum synth set");
    };
    assert_eq!(minimum_synth, implied.receive());
    assert!(minimum_synth < result.receive_value());
}

#[test]
fn redeem_and_swap_into_external_token() {
    let request = ExchangeRequest::new(Side::Pay, jeur(), weth(), "1000");
    let result = quote(&request);
    assert!(!result.is_loading());
    assert!(!result.route_not_found());
    // 1000 jEUR ≈ 1097.8 USDC ≈ 0.549 WETH
    assert!(result.receive_value() > &d("0.54"));
    assert!(result.receive_value() < &d("0.55"));
    let Some(summary) = result.trade_summary() else {
        panic!("route summarised");
    };
    assert_eq!(summary.path(), &[addr(USDC), addr(WETH)]);
}

#[test]
fn swap_and_mint_backward_bounds_the_input() {
    let request = ExchangeRequest::new(Side::Receive, weth(), jeur(), "500");
    let result = quote(&request);
    assert_eq!(result.receive_value(), &d("500"));
    let Some(max) = result.maximum_sent_value() else {
        panic!("maximum set");
    };
    assert!(max > result.pay_value());
}

// ---------------------------------------------------------------------------
// Flags and guards
// ---------------------------------------------------------------------------

#[test]
fn zero_amount_is_empty_on_either_side() {
    for base in [Side::Pay, Side::Receive] {
        let result = quote(&ExchangeRequest::new(base, matic(), jeur(), "0"));
        assert_eq!(result, ExchangeResult::empty());
    }
}

#[test]
fn invalid_amount_is_an_error() {
    let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "abc");
    assert!(compute_exchange(&request, &network(), &QuoteConfig::default(), &prices(), &reserves())
        .is_err());
}

#[test]
fn pending_reserves_flag_loading() {
    let pending = ReserveSnapshot::builder(1)
        .with_pending(ChainId::POLYGON, addr(WMATIC), addr(USDC))
        .build();
    let result = quote_with(&ExchangeRequest::new(Side::Pay, matic(), jeur(), "10"), &prices(), &pending);
    assert!(result.is_loading());
    assert!(!result.route_not_found());
}

#[test]
fn unlisted_token_has_no_route() {
    let result = quote(&ExchangeRequest::new(Side::Pay, unlisted(), jeur(), "10"));
    assert!(result.route_not_found());
    assert!(!result.is_loading());
}

#[test]
fn missing_price_flags_loading() {
    let result = quote_with(
        &ExchangeRequest::new(Side::Pay, usdc(), jeur(), "10"),
        &PriceSnapshot::new(1),
        &reserves(),
    );
    assert!(result.is_loading());
}

// ---------------------------------------------------------------------------
// Best trade threshold
// ---------------------------------------------------------------------------

fn tok(byte: u8) -> Token {
    Token::new(ChainId::POLYGON, addr(byte), Decimals::MAX)
}

fn fee_free_pair(a: u8, ra: u128, b: u8, rb: u128) -> TradingPair {
    let Ok(tokens) = TokenPair::new(tok(a), tok(b)) else {
        panic!("distinct tokens");
    };
    let (r0, r1) = if tokens.first() == tok(a) { (ra, rb) } else { (rb, ra) };
    TradingPair::new(tokens, BigUint::from(r0), BigUint::from(r1)).with_fee(BasisPoints::ZERO)
}

#[test]
fn small_multihop_improvement_keeps_one_hop() {
    const DEEP: u128 = 1_000_000_000_000_000_000_000_000;
    let mut graph = TradingPairGraph::new();
    // 1.000 direct, 1.003 through token 2
    graph.insert_pair(fee_free_pair(1, DEEP, 3, DEEP));
    graph.insert_pair(fee_free_pair(1, DEEP, 2, DEEP / 1_000 * 1_003));
    graph.insert_pair(fee_free_pair(2, DEEP, 3, DEEP));

    let amount = TokenAmount::new(tok(1), 1_000_000_000_000u64);
    let selector = BestTradeSelector::new(3, BasisPoints::new(50));
    let Ok(Some(best)) = selector.best_trade_exact_in(&graph, &amount, &tok(3)) else {
        panic!("expected a trade");
    };
    assert_eq!(best.hops(), 1);
}

// ---------------------------------------------------------------------------
// Calculator, cache and session
// ---------------------------------------------------------------------------

#[test]
fn calculator_applies_config_defaults() {
    let config = QuoteConfig::default()
        .with_fee_percentage(d("0.0015"))
        .with_network(network());
    let request = ExchangeRequest::new(Side::Pay, jeur(), jchf(), "100");
    let Ok(result) =
        ExchangeCalculator::new(&config).quote(&request, ChainId::POLYGON, &prices(), &reserves())
    else {
        panic!("network configured");
    };
    assert_eq!(result.fee(), &d("0.165"));
}

#[test]
fn cache_serves_repeat_quotes_until_prices_move() {
    let mut cache = QuoteCache::new();
    let config = QuoteConfig::default();
    let request = ExchangeRequest::new(Side::Pay, matic(), jeur(), "10");

    let (Ok(first), Ok(second)) = (
        cache.quote(&request, &network(), &config, &prices(), &reserves()),
        cache.quote(&request, &network(), &config, &prices(), &reserves()),
    ) else {
        panic!("amount parses");
    };
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);

    let moved = prices().next([("EURUSD", d("1.20"))]);
    let Ok(third) = cache.quote(&request, &network(), &config, &moved, &reserves()) else {
        panic!("amount parses");
    };
    assert!(third.receive_value() < first.receive_value());
    assert_eq!(cache.len(), 1);
}

#[test]
fn session_keeps_the_latest_quote() {
    let mut session = QuoteSession::new();
    let stale = session.begin();
    let fresh = session.begin();
    let fresh_result = quote(&ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110"));
    assert!(session.complete(fresh, fresh_result.clone()));
    assert!(!session.complete(stale, ExchangeResult::loading()));
    assert_eq!(session.latest(), Some(&fresh_result));
}

// ---------------------------------------------------------------------------
// Bundled configuration and market documents
// ---------------------------------------------------------------------------

#[test]
fn builtin_config_covers_three_chains() {
    let Ok(config) = QuoteConfig::builtin() else {
        panic!("bundled config parses");
    };
    for chain in [ChainId::MAINNET, ChainId::KOVAN, ChainId::POLYGON] {
        let Some(network) = config.network(chain) else {
            panic!("network {chain} configured");
        };
        assert_eq!(network.bridge_tokens().len(), 9);
        assert!(network.collateral().is_some());
    }
    assert!(config.network(ChainId::MUMBAI).is_none());
}

#[test]
fn market_document_drives_a_quote() {
    let source = r#"
        version = 3
        chain_id = 137

        [prices]
        EURUSD = "1.10"

        [[pools]]
        token_a = "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"
        reserve_a = "1000000000000000000000000"
        token_b = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
        reserve_b = "2000000000000"
    "#;
    let Ok(market) = MarketSnapshot::from_toml_str(source) else {
        panic!("market parses");
    };
    let chain = market.chain_id();
    let Ok((prices, reserves)) = market.into_snapshots() else {
        panic!("reserves parse");
    };
    let Ok(config) = QuoteConfig::builtin() else {
        panic!("bundled config parses");
    };
    let Ok(wmatic) = TokenAddress::parse("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270") else {
        panic!("valid address");
    };
    let native = AssetDescriptor::new("MATIC", Decimals::MAX, AssetRole::NativeCoin).with_address(wmatic);
    let request = ExchangeRequest::new(Side::Pay, native, jeur(), "10");

    let Ok(result) = ExchangeCalculator::new(&config).quote(&request, chain, &prices, &reserves) else {
        panic!("polygon configured");
    };
    assert!(!result.is_loading());
    assert!(!result.route_not_found());
    // 10 MATIC ≈ 20 USDC ≈ 18.1 jEUR
    assert!(result.receive_value() > &d("18"));
    assert!(result.receive_value() < &d("18.2"));
}

#[test]
fn result_serializes_for_display() {
    let result = quote(&ExchangeRequest::new(Side::Pay, usdc(), jeur(), "110"));
    let Ok(json) = serde_json::to_value(&result) else {
        panic!("serializes");
    };
    assert!(json.get("receive_value").is_some());
    assert!(json.get("minimum_receive_value").is_none());
}

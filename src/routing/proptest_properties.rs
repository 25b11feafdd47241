//! Property-based tests for route enumeration and trade selection.
//!
//! 1. **Simple paths**: every route is loop-free and within the hop budget.
//! 2. **Determinism**: the same graph yields the same candidates.
//! 3. **Exact-out delivers**: selling the input an exact-output trade asks
//!    for returns at least the requested output.
//! 4. **Slippage bounds**: the minimum never exceeds the quote, the maximum
//!    never undercuts it.
//! 5. **Threshold**: a two-hop route wins only when it beats the direct
//!    route by more than the threshold.

#![allow(clippy::panic)]

use proptest::prelude::*;

use num_bigint::BigUint;

use super::{BestTradeSelector, RouteFinder, Trade, BETTER_TRADE_LESS_HOPS_THRESHOLD};
use crate::domain::{BasisPoints, ChainId, Decimals, Token, TokenAddress, TokenAmount, TokenPair};
use crate::graph::{TradingPair, TradingPairGraph};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok(byte: u8) -> Token {
    Token::new(
        ChainId::POLYGON,
        TokenAddress::from_bytes([byte; 20]),
        Decimals::MAX,
    )
}

fn make_pair(a: u8, ra: u128, b: u8, rb: u128, fee: u32) -> TradingPair {
    let Ok(tokens) = TokenPair::new(tok(a), tok(b)) else {
        panic!("distinct tokens");
    };
    let (r0, r1) = if tokens.first() == tok(a) { (ra, rb) } else { (rb, ra) };
    TradingPair::new(tokens, BigUint::from(r0), BigUint::from(r1)).with_fee(BasisPoints::new(fee))
}

/// Fully connected graph over tokens `1..=n` with reserves drawn from `reserves`.
fn complete_graph(n: u8, reserves: &[u128]) -> TradingPairGraph {
    let mut g = TradingPairGraph::new();
    let mut i = 0;
    for a in 1..=n {
        for b in (a + 1)..=n {
            let r = reserves[i % reserves.len()];
            let s = reserves[(i + 1) % reserves.len()];
            g.insert_pair(make_pair(a, r, b, s, 30));
            i += 1;
        }
    }
    g
}

const DEEP: u128 = 1_000_000_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000_000u128
}

/// Bridge route advantage over the direct route, in basis points, away
/// from the threshold boundary.
fn gain_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..=45u32, 55u32..=300u32]
}

// ---------------------------------------------------------------------------
// Properties 1-2: enumeration
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_routes_are_simple_and_bounded(
        n in 3u8..=6u8,
        max_hops in 1usize..=4usize,
        reserves in prop::collection::vec(reserve_strategy(), 2..8),
    ) {
        let g = complete_graph(n, &reserves);
        let Ok(routes) = RouteFinder::new(&g).find_routes(&tok(1), &tok(n), max_hops) else {
            panic!("graph is consistent");
        };
        prop_assert!(!routes.is_empty());
        for route in &routes {
            prop_assert!(route.hops() <= max_hops);
            prop_assert_eq!(route.path().len(), route.hops() + 1);
            let mut seen: Vec<Token> = route.path().to_vec();
            seen.sort_by_key(Token::address);
            seen.dedup();
            prop_assert_eq!(seen.len(), route.path().len());
            prop_assert_eq!(route.input(), tok(1));
            prop_assert_eq!(route.output(), tok(n));
        }
    }

    #[test]
    fn prop_enumeration_is_deterministic(
        n in 3u8..=5u8,
        reserves in prop::collection::vec(reserve_strategy(), 2..8),
    ) {
        let a = complete_graph(n, &reserves);
        let b = complete_graph(n, &reserves);
        prop_assert_eq!(
            RouteFinder::new(&a).find_routes(&tok(1), &tok(n), 3),
            RouteFinder::new(&b).find_routes(&tok(1), &tok(n), 3)
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 3-4: pricing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_out_input_delivers_target(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        rc in reserve_strategy(),
        divisor in 10u128..=10_000u128,
    ) {
        let mut g = TradingPairGraph::new();
        g.insert_pair(make_pair(1, ra, 2, rb, 30));
        g.insert_pair(make_pair(2, rb, 3, rc, 30));

        let target = TokenAmount::new(tok(3), (rc / divisor).max(1));
        let Ok(Some(purchase)) =
            BestTradeSelector::default().best_trade_exact_out(&g, &tok(1), &target)
        else {
            return Ok(());
        };
        let Ok(Some(sale)) =
            BestTradeSelector::default().best_trade_exact_in(&g, purchase.input(), &tok(3))
        else {
            panic!("the purchase input must be sellable");
        };
        prop_assert!(sale.output().raw() >= target.raw());
    }

    #[test]
    fn prop_slippage_bounds_bracket_quote(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        divisor in 10u128..=10_000u128,
        slippage in 0u32..=5_000u32,
    ) {
        let Ok(route) = super::Route::new(vec![make_pair(1, ra, 2, rb, 30)], tok(1)) else {
            panic!("connected route");
        };
        let slippage = BasisPoints::new(slippage);
        if let Ok(t) = Trade::exact_in(route.clone(), TokenAmount::new(tok(1), (ra / divisor).max(1))) {
            prop_assert!(t.minimum_amount_out(slippage).raw() <= t.output().raw());
            prop_assert_eq!(t.maximum_amount_in(slippage), t.input().clone());
        }
        if let Ok(t) = Trade::exact_out(route, TokenAmount::new(tok(2), (rb / divisor).max(1))) {
            prop_assert!(t.maximum_amount_in(slippage).raw() >= t.input().raw());
            prop_assert_eq!(t.minimum_amount_out(slippage), t.output().clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: threshold
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_threshold_decides_hop_count(gain in gain_strategy()) {
        let mut g = TradingPairGraph::new();
        g.insert_pair(make_pair(1, DEEP, 3, DEEP, 0));
        g.insert_pair(make_pair(1, DEEP, 2, DEEP * u128::from(10_000 + gain) / 10_000, 0));
        g.insert_pair(make_pair(2, DEEP, 3, DEEP, 0));

        let amount = TokenAmount::new(tok(1), 1_000_000_000_000u64);
        let Ok(Some(best)) = BestTradeSelector::default().best_trade_exact_in(&g, &amount, &tok(3)) else {
            panic!("a route exists");
        };
        let expected = if gain > BETTER_TRADE_LESS_HOPS_THRESHOLD.get() { 2 } else { 1 };
        prop_assert_eq!(best.hops(), expected);
    }
}

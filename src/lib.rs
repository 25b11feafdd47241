//! # Exchange Quote
//!
//! Client-side quoting for a synthetic asset exchange: given what the user
//! pays and what they want, compute the exact counter-amount, the protocol
//! fee and, when an AMM swap is involved, the slippage-bounded minimum or
//! maximum the transaction should carry.
//!
//! All arithmetic is exact. Amounts are 18-digit fixed-point decimals over
//! arbitrary-precision integers, pair math is the Uniswap V2 integer
//! formula, and route comparison uses exact rationals; no floating point
//! enters a quote.
//!
//! Three request shapes are served:
//!
//! - **Exchange**: synthetic to synthetic through the collateral.
//! - **Mint**: collateral into a synthetic, optionally preceded by an AMM
//!   swap from any routable token.
//! - **Redeem**: a synthetic into collateral, optionally followed by an AMM
//!   swap into any routable token.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | yes | The `quote` binary (clap, serde_json, tracing-subscriber) |
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! exchange-quote = { version = "0.1", default-features = false }
//! ```
//!
//! ## Quote a swap-and-mint on Polygon
//!
//! ```rust
//! use exchange_quote::config::QuoteConfig;
//! use exchange_quote::domain::{
//!     AssetDescriptor, AssetRole, ChainId, Decimals, FixedPointAmount, Side, TokenAddress,
//! };
//! use exchange_quote::exchange::{ExchangeCalculator, ExchangeRequest};
//! use exchange_quote::snapshot::{PriceSnapshot, ReserveSnapshot};
//!
//! // 1. Bundled network tables: bridge tokens, factory, collateral
//! let config = QuoteConfig::builtin().expect("bundled config");
//!
//! // 2. Market data: one oracle price and one pool
//! let wmatic = TokenAddress::parse("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270").expect("hex");
//! let usdc = TokenAddress::parse("0x2791bca1f2de4661ed88a30c99a7a9449aa84174").expect("hex");
//! let prices = PriceSnapshot::builder(1)
//!     .with_price("EURUSD", FixedPointAmount::parse("1.10").expect("decimal"))
//!     .build();
//! let reserves = ReserveSnapshot::builder(1)
//!     .with_reserves(
//!         ChainId::POLYGON,
//!         wmatic, 1_000_000u128 * 10u128.pow(18),
//!         usdc, 2_000_000u128 * 10u128.pow(6),
//!     )
//!     .build();
//!
//! // 3. Pay 10 MATIC, receive jEUR
//! let matic = AssetDescriptor::new("MATIC", Decimals::MAX, AssetRole::NativeCoin)
//!     .with_address(wmatic);
//! let jeur = AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic)
//!     .with_pair_key("EURUSD");
//! let request = ExchangeRequest::new(Side::Pay, matic, jeur, "10");
//!
//! let result = ExchangeCalculator::new(&config)
//!     .quote(&request, ChainId::POLYGON, &prices, &reserves)
//!     .expect("parsable amount");
//!
//! assert!(!result.is_loading());
//! assert!(!result.route_not_found());
//! let minimum = result.minimum_synth_receive_value().expect("AMM leg");
//! assert!(minimum < result.receive_value());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ ExchangeRequest  │  pay / receive asset, typed amount, fee, slippage
//! └────────┬─────────┘
//!          │ compute_exchange(request, network, config, prices, reserves)
//!          ▼
//! ┌──────────────────┐
//! │    exchange      │  RequestKind, DirectPricer, AMM legs, flags
//! └────────┬─────────┘
//!          │ AMM leg only
//!          ▼
//! ┌──────────────────┐
//! │     routing      │  RouteFinder, Trade, BestTradeSelector
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      graph       │  combinations, PairState, TradingPairGraph
//! └────────┬─────────┘
//!          │ ReserveLookup / PriceFeed
//!          ▼
//! ┌──────────────────┐
//! │ domain + math    │  FixedPointAmount, Token, Price, constant product
//! └──────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`FixedPointAmount`](domain::FixedPointAmount), [`Token`](domain::Token), [`Price`](domain::Price), etc. |
//! | [`math`] | Uniswap V2 constant-product formulas |
//! | [`graph`] | Candidate pairs, pair state and the [`TradingPairGraph`](graph::TradingPairGraph) arena |
//! | [`routing`] | [`RouteFinder`](routing::RouteFinder), [`Trade`](routing::Trade) and [`BestTradeSelector`](routing::BestTradeSelector) |
//! | [`exchange`] | [`compute_exchange`](exchange::compute_exchange), [`QuoteCache`](exchange::QuoteCache), [`QuoteSession`](exchange::QuoteSession) |
//! | [`traits`] | [`PriceFeed`](traits::PriceFeed) and [`ReserveLookup`](traits::ReserveLookup) collaborators |
//! | [`snapshot`] | Versioned in-memory implementations of the collaborators |
//! | [`config`] | [`QuoteConfig`](config::QuoteConfig) and per-chain [`NetworkConfig`](config::NetworkConfig) |
//! | [`error`] | [`QuoteError`](error::QuoteError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod graph;
pub mod math;
pub mod prelude;
pub mod routing;
pub mod snapshot;
pub mod traits;

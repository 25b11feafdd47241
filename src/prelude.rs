//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use exchange_quote::prelude::*;
//! ```
//!
//! Brings the value types, the two collaborator traits, configuration,
//! the quoting entry points and the error type into scope.

pub use crate::domain::{
    AssetDescriptor, AssetRole, BasisPoints, ChainId, Decimals, FixedPointAmount, Price, Side,
    Token, TokenAddress, TokenAmount, TokenPair, TradeType,
};

pub use crate::traits::{PoolLookup, PriceFeed, ReserveLookup};

pub use crate::config::{NetworkConfig, QuoteConfig};

pub use crate::graph::{TradingPair, TradingPairGraph};

pub use crate::routing::{BestTradeSelector, Route, RouteFinder, Trade};

pub use crate::exchange::{
    compute_exchange, ExchangeCalculator, ExchangeRequest, ExchangeResult, QuoteCache,
    QuoteSession, RequestKind,
};

pub use crate::snapshot::{PriceSnapshot, ReserveSnapshot};

pub use crate::error::{QuoteError, Result};

//! Exchange quoting: request classification, collateral math, the AMM leg
//! and the caller-side cache.
//!
//! [`compute_exchange`] is the entry point. It is a pure function of the
//! request, the network, the configuration and two market snapshots;
//! [`QuoteCache`] and [`QuoteSession`] are optional layers a caller owns
//! around it.

mod cache;
mod calculator;
mod direct;
mod max_mintable;
mod request;
mod result;
mod session;

pub use cache::{QuoteCache, QuoteKey, DEFAULT_CAPACITY};
pub use calculator::{compute_exchange, ExchangeCalculator};
pub use direct::{collateral_for, tokens_for, truncate_to, DirectPricer, DirectQuote};
pub use max_mintable::{max_mintable, LiquidityPosition};
pub use request::{ExchangeRequest, RequestKind, DEFAULT_SLIPPAGE};
pub use result::{ExchangeResult, TradeSummary};
pub use session::{QuoteSession, QuoteTicket};

//! Quoting configuration.
//!
//! [`QuoteConfig`] holds the global defaults (hop budget, slippage, protocol
//! fee, multi-hop threshold) and one [`NetworkConfig`] per supported chain.
//! Both deserialize from TOML; a bundled document is available through
//! [`QuoteConfig::builtin`].

mod network;
mod quote_config;

pub use network::{BaseOverride, InitCodeHash, NetworkConfig, TokenEntry};
pub use quote_config::QuoteConfig;

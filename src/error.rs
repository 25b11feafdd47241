//! Unified error types for the exchange quoting library.
//!
//! All fallible operations across the crate return [`QuoteError`] as their
//! error type. Conditions the caller is expected to render rather than
//! handle (a missing route, a price that has not arrived yet) are reported
//! as flags on [`ExchangeResult`](crate::exchange::ExchangeResult) and never
//! surface here.

use thiserror::Error;

/// Errors produced by amount parsing, pair math, routing, and configuration.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A decimal, float, or hex input could not be turned into an amount.
    #[error("invalid number format: {0}")]
    InvalidNumberFormat(&'static str),

    /// Division by a zero amount.
    #[error("division by zero")]
    DivisionByZero,

    /// Two trades with different trade types or currencies were compared.
    #[error("comparing incomparable trades")]
    IncomparableTrades,

    /// The input amount is too small to produce any output from a pair.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A pair has zero reserves or cannot cover the requested output.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// A token is not usable in the requested position.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A decimal count is outside `0..=18`.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A hex address could not be decoded.
    #[error("invalid address: {0}")]
    InvalidAddress(&'static str),

    /// A configuration value violates an invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration document could not be decoded.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for QuoteError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidNumberFormat(a), Self::InvalidNumberFormat(b))
            | (Self::InvalidToken(a), Self::InvalidToken(b))
            | (Self::InvalidPrecision(a), Self::InvalidPrecision(b))
            | (Self::InvalidAddress(a), Self::InvalidAddress(b)) => a == b,
            (Self::InvalidConfiguration(a), Self::InvalidConfiguration(b)) => a == b,
            (Self::DivisionByZero, Self::DivisionByZero)
            | (Self::IncomparableTrades, Self::IncomparableTrades)
            | (Self::InsufficientInputAmount, Self::InsufficientInputAmount)
            | (Self::InsufficientReserves, Self::InsufficientReserves) => true,
            (Self::Config(a), Self::Config(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl QuoteError {
    /// Returns `true` for pair-math failures that make a candidate path
    /// unusable without invalidating the search.
    #[must_use]
    pub const fn is_insufficient_liquidity(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInputAmount | Self::InsufficientReserves
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, QuoteError>;

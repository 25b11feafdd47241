//! Fundamental domain value types used throughout the quoting library.
//!
//! This module contains the core value types that model the exchange domain:
//! fixed-point amounts, tokens, asset descriptors, prices, and percentages.
//! All types use newtypes with validated constructors to enforce invariants.

mod asset;
mod basis_points;
mod chain;
mod decimals;
mod fixed_point;
mod price;
mod token;
mod token_address;
mod token_amount;
mod token_pair;
mod trade_type;

#[cfg(test)]
mod proptest_properties;

pub use asset::{AssetDescriptor, AssetRole};
pub use basis_points::BasisPoints;
pub use chain::ChainId;
pub use decimals::Decimals;
pub use fixed_point::{FixedPointAmount, SCALE_DIGITS};
pub use price::Price;
pub use token::Token;
pub use token_address::TokenAddress;
pub use token_amount::TokenAmount;
pub use token_pair::TokenPair;
pub use trade_type::{Side, TradeType};

pub(crate) use fixed_point::ten_pow;
pub(crate) use price::{to_signed, to_unsigned};

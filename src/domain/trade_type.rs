//! Which side of a trade is fixed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Descriptor for the constraint that drives a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TradeType {
    /// The input amount is fixed; output is computed.
    ExactInput = 0,
    /// The output amount is fixed; input is computed.
    ExactOutput = 1,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactInput => write!(f, "ExactInput"),
            Self::ExactOutput => write!(f, "ExactOutput"),
        }
    }
}

/// Which side of an exchange the user is typing into.
///
/// The other side is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The user typed the amount they pay.
    #[default]
    Pay,
    /// The user typed the amount they want to receive.
    Receive,
}

impl Side {
    /// The trade type an AMM leg uses when this side is fixed.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        match self {
            Self::Pay => TradeType::ExactInput,
            Self::Receive => TradeType::ExactOutput,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pay => write!(f, "pay"),
            Self::Receive => write!(f, "receive"),
        }
    }
}

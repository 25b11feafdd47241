//! EVM token address.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QuoteError;

/// A 20-byte EVM address identifying a token or contract.
///
/// Parsed from `0x`-prefixed hex in any letter case and displayed as
/// lowercase hex. Ordering is byte-wise, which coincides with comparing the
/// lowercase hex strings and therefore with the canonical token order used
/// by pair factories.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::TokenAddress;
///
/// let addr: TokenAddress = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
///     .parse()
///     .expect("valid address");
/// assert_eq!(addr.to_string(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    /// Parses a hex address with an optional `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidAddress`] if the input is not exactly
    /// 40 hex digits.
    pub fn parse(input: &str) -> Result<Self, QuoteError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 40 {
            return Err(QuoteError::InvalidAddress("expected 40 hex digits"));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| QuoteError::InvalidAddress("invalid hex digit"))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAddress({self})")
    }
}

impl FromStr for TokenAddress {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TokenAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    #[test]
    fn parse_mixed_case() {
        let Ok(addr) = TokenAddress::parse(WETH) else {
            panic!("expected Ok");
        };
        assert_eq!(addr.as_bytes()[0], 0xc0);
        assert_eq!(addr.as_bytes()[19], 0xc2);
        assert_eq!(addr.to_string(), WETH.to_lowercase());
    }

    #[test]
    fn parse_without_prefix() {
        let Ok(a) = TokenAddress::parse(&WETH[2..]) else {
            panic!("expected Ok");
        };
        let Ok(b) = TokenAddress::parse(WETH) else {
            panic!("expected Ok");
        };
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            TokenAddress::parse("0x1234"),
            Err(QuoteError::InvalidAddress("expected 40 hex digits"))
        );
        let bad = format!("0x{}", "g".repeat(40));
        assert_eq!(
            TokenAddress::parse(&bad),
            Err(QuoteError::InvalidAddress("invalid hex digit"))
        );
    }

    #[test]
    fn ordering_matches_lowercase_hex() {
        let Ok(lo) = TokenAddress::parse("0x0000000000000000000000000000000000000001") else {
            panic!("expected Ok");
        };
        let Ok(hi) = TokenAddress::parse("0xA000000000000000000000000000000000000000") else {
            panic!("expected Ok");
        };
        assert!(lo < hi);
        assert!(lo.to_string() < hi.to_string());
    }

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(TokenAddress::zero().as_bytes(), &[0u8; 20]);
    }

    #[test]
    fn serde_as_hex_string() {
        let addr = TokenAddress::from_bytes([0xab; 20]);
        let Ok(json) = serde_json::to_string(&addr) else {
            panic!("serializable");
        };
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let Ok(back) = serde_json::from_str::<TokenAddress>(&json) else {
            panic!("deserializable");
        };
        assert_eq!(back, addr);
    }

    #[test]
    fn debug_format() {
        let dbg = format!("{:?}", TokenAddress::zero());
        assert!(dbg.contains("TokenAddress"));
    }
}

//! Exact decimal amounts with 18 implied fractional digits.
//!
//! [`FixedPointAmount`] wraps a signed arbitrary-precision integer `raw`
//! that represents `value × 10^18`, the same encoding ERC-20 contracts use
//! for 18-decimal tokens. Addition, subtraction, and comparison act on
//! `raw` directly; multiplication and division rescale so that results stay
//! bit-exact with the integer arithmetic performed on-chain.
//!
//! # Truncation policy
//!
//! Every operation that loses precision truncates toward zero, matching
//! integer division on the EVM:
//!
//! - parsing drops fractional digits beyond the 18th,
//! - `mul` computes `(a.raw × b.raw) / 10^18`,
//! - [`checked_div`](FixedPointAmount::checked_div) computes
//!   `(a.raw × 10^18) / b.raw`.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Decimals;
use crate::error::{QuoteError, Result};

/// Number of implied fractional digits.
pub const SCALE_DIGITS: u32 = 18;

/// `10^18`, the raw value of one whole unit.
const SCALE: u64 = 1_000_000_000_000_000_000;

/// Returns `10^exp` as a [`BigInt`].
pub(crate) fn ten_pow(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

/// An exact signed decimal amount scaled by `10^18`.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::FixedPointAmount;
///
/// let a = FixedPointAmount::parse("1.005").expect("valid decimal");
/// assert_eq!(a.raw().to_string(), "1005000000000000000");
/// assert_eq!(a.format(Some(2)), "1.00");
///
/// let third = FixedPointAmount::from_whole(69)
///     .checked_div(&FixedPointAmount::from_whole(3))
///     .expect("non-zero divisor");
/// assert_eq!(third, FixedPointAmount::from_whole(23));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPointAmount {
    raw: BigInt,
}

impl FixedPointAmount {
    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self { raw: BigInt::zero() }
    }

    /// One whole unit (`raw = 10^18`).
    #[must_use]
    pub fn one() -> Self {
        Self {
            raw: BigInt::from(SCALE),
        }
    }

    /// Wraps a raw scaled integer without any rescaling.
    #[must_use]
    pub fn from_raw(raw: impl Into<BigInt>) -> Self {
        Self { raw: raw.into() }
    }

    /// Creates an amount from a whole-unit integer (`raw = value × 10^18`).
    #[must_use]
    pub fn from_whole(value: impl Into<BigInt>) -> Self {
        Self {
            raw: value.into() * BigInt::from(SCALE),
        }
    }

    /// Parses a decimal string.
    ///
    /// Accepts an optional leading `-`, digits, and at most one `.`.
    /// Surrounding whitespace is ignored. A lone `.` or an empty string is
    /// zero, and `"5."` / `".5"` are accepted as typed. Fractional digits
    /// beyond the 18th are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidNumberFormat`] if the input contains more
    /// than one `.`, a character other than digits, or a sign with no digits.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if body.matches('.').count() > 1 {
            return Err(QuoteError::InvalidNumberFormat(
                "number cannot contain more than one dot",
            ));
        }

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if negative && whole.is_empty() && fraction.is_empty() {
            return Err(QuoteError::InvalidNumberFormat("sign without digits"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(QuoteError::InvalidNumberFormat("unexpected character"));
        }

        let kept = &fraction[..fraction.len().min(SCALE_DIGITS as usize)];
        let mut digits = String::with_capacity(whole.len() + SCALE_DIGITS as usize);
        digits.push_str(whole);
        digits.push_str(kept);
        digits.extend(core::iter::repeat('0').take(SCALE_DIGITS as usize - kept.len()));

        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or(QuoteError::InvalidNumberFormat("unexpected character"))?;
        Ok(Self {
            raw: if negative { -magnitude } else { magnitude },
        })
    }

    /// Converts a float through its shortest non-exponential decimal form.
    ///
    /// `7.514464338823816e-7` is read as `0.0000007514464338823816` and then
    /// truncated to 18 fractional digits like any typed string.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidNumberFormat`] for NaN or infinite input.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(QuoteError::InvalidNumberFormat("non-finite float"));
        }
        Self::parse(&value.to_string())
    }

    /// Parses a hex integer, with or without a `0x` prefix.
    ///
    /// With `raw = true` the value is taken as already scaled; otherwise it
    /// is treated as whole units.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidNumberFormat`] if the input is not hex.
    pub fn from_hex(input: &str, raw: bool) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let value = BigInt::parse_bytes(digits.as_bytes(), 16)
            .ok_or(QuoteError::InvalidNumberFormat("invalid hex digits"))?;
        Ok(if raw {
            Self::from_raw(value)
        } else {
            Self::from_whole(value)
        })
    }

    /// Converts an amount expressed in a token's smallest unit.
    ///
    /// With `decimals = 6`, `1_500_000` becomes `1.5`.
    #[must_use]
    pub fn from_units(units: impl Into<BigInt>, decimals: Decimals) -> Self {
        Self {
            raw: units.into() * ten_pow(SCALE_DIGITS - u32::from(decimals.get())),
        }
    }

    /// Returns the amount in a token's smallest unit, truncating digits the
    /// token cannot represent.
    #[must_use]
    pub fn to_units(&self, decimals: Decimals) -> BigInt {
        &self.raw / ten_pow(SCALE_DIGITS - u32::from(decimals.get()))
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(&self) -> &BigInt {
        &self.raw
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.raw.is_negative()
    }

    /// Divides by `other`, scaling the dividend first:
    /// `raw = (self.raw × 10^18) / other.raw`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        if other.raw.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        Ok(Self {
            raw: (&self.raw * BigInt::from(SCALE)) / &other.raw,
        })
    }

    /// Multiplies `raw` by `10^by` without touching the scale.
    #[must_use]
    pub fn increase_precision(&self, by: u32) -> Self {
        Self {
            raw: &self.raw * ten_pow(by),
        }
    }

    /// Divides `raw` by `10^by`, truncating toward zero.
    #[must_use]
    pub fn decrease_precision(&self, by: u32) -> Self {
        Self {
            raw: &self.raw / ten_pow(by),
        }
    }

    /// Raises the amount to `power` by repeated fixed-point multiplication,
    /// truncating after every step.
    #[must_use]
    pub fn pow(&self, power: u32) -> Self {
        match power {
            0 => Self::one(),
            _ => (1..power).fold(self.clone(), |acc, _| &acc * self),
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            raw: self.raw.abs(),
        }
    }

    /// Renders the amount as a decimal string.
    ///
    /// - `None`: whole part and the full 18-digit fraction.
    /// - `Some(0)`: whole part only.
    /// - `Some(n)`: fraction padded or truncated to `n` digits.
    ///
    /// ```
    /// use exchange_quote::domain::FixedPointAmount;
    ///
    /// let half = FixedPointAmount::parse(".5").expect("valid");
    /// assert_eq!(half.format(Some(0)), "0");
    /// assert_eq!(half.format(Some(3)), "0.500");
    /// assert_eq!(half.format(None), "0.500000000000000000");
    /// ```
    #[must_use]
    pub fn format(&self, decimals: Option<usize>) -> String {
        let (sign, whole, fraction) = self.parts();
        match decimals {
            None => format!("{sign}{whole}.{fraction}"),
            Some(0) => format!("{sign}{whole}"),
            Some(n) => {
                let mut digits: String = fraction.chars().take(n).collect();
                digits.extend(core::iter::repeat('0').take(n.saturating_sub(digits.len())));
                format!("{sign}{whole}.{digits}")
            }
        }
    }

    /// Lossy conversion for display and charting. Never use the result in
    /// further amount arithmetic.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.format(None).parse().unwrap_or_default()
    }

    fn parts(&self) -> (&'static str, String, String) {
        let sign = if self.raw.is_negative() { "-" } else { "" };
        let (whole, fraction) = self.raw.abs().div_rem(&BigInt::from(SCALE));
        let fraction = format!("{:0>width$}", fraction.to_string(), width = SCALE_DIGITS as usize);
        (sign, whole.to_string(), fraction)
    }
}

/// Trims trailing fractional zeros: `-123`, `0.5`, `0.989898989898989898`.
impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, whole, fraction) = self.parts();
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            write!(f, "{sign}{whole}")
        } else {
            write!(f, "{sign}{whole}.{fraction}")
        }
    }
}

impl FromStr for FixedPointAmount {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for FixedPointAmount {
    type Error = QuoteError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

impl From<u64> for FixedPointAmount {
    fn from(value: u64) -> Self {
        Self::from_whole(value)
    }
}

impl From<i64> for FixedPointAmount {
    fn from(value: i64) -> Self {
        Self::from_whole(value)
    }
}

// -- Arithmetic -------------------------------------------------------------

impl Add for &FixedPointAmount {
    type Output = FixedPointAmount;

    fn add(self, rhs: Self) -> FixedPointAmount {
        FixedPointAmount {
            raw: &self.raw + &rhs.raw,
        }
    }
}

impl Add for FixedPointAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            raw: self.raw + rhs.raw,
        }
    }
}

impl Sub for &FixedPointAmount {
    type Output = FixedPointAmount;

    fn sub(self, rhs: Self) -> FixedPointAmount {
        FixedPointAmount {
            raw: &self.raw - &rhs.raw,
        }
    }
}

impl Sub for FixedPointAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            raw: self.raw - rhs.raw,
        }
    }
}

impl Mul for &FixedPointAmount {
    type Output = FixedPointAmount;

    fn mul(self, rhs: Self) -> FixedPointAmount {
        FixedPointAmount {
            raw: (&self.raw * &rhs.raw) / BigInt::from(SCALE),
        }
    }
}

impl Mul for FixedPointAmount {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Neg for FixedPointAmount {
    type Output = Self;

    fn neg(self) -> Self {
        Self { raw: -self.raw }
    }
}

impl Sum for FixedPointAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a FixedPointAmount> for FixedPointAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| &acc + v)
    }
}

// -- Serde ------------------------------------------------------------------

impl Serialize for FixedPointAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format(None))
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = FixedPointAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Self::Value, E> {
        FixedPointAmount::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<Self::Value, E> {
        Ok(FixedPointAmount::from_whole(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<Self::Value, E> {
        Ok(FixedPointAmount::from_whole(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> core::result::Result<Self::Value, E> {
        FixedPointAmount::from_f64(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FixedPointAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fpn(s: &str) -> FixedPointAmount {
        let Ok(v) = FixedPointAmount::parse(s) else {
            panic!("invalid test amount: {s}");
        };
        v
    }

    fn float(v: f64) -> FixedPointAmount {
        let Ok(a) = FixedPointAmount::from_f64(v) else {
            panic!("invalid test float: {v}");
        };
        a
    }

    fn raw_of(a: &FixedPointAmount) -> String {
        a.raw().to_string()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn whole_integer_scales() {
        assert_eq!(raw_of(&FixedPointAmount::from_whole(1)), "1000000000000000000");
        assert_eq!(
            raw_of(&FixedPointAmount::from_whole(1234)),
            "1234000000000000000000"
        );
    }

    #[test]
    fn float_literals() {
        assert_eq!(raw_of(&float(3.25)), "3250000000000000000");
        assert_eq!(raw_of(&float(-5.5)), "-5500000000000000000");
        assert_eq!(float(99.123).format(Some(3)), "99.123");
    }

    #[test]
    fn float_exponent_notation() {
        assert_eq!(float(0.000_552_099_602_784_905_7).format(Some(5)), "0.00055");
        assert_eq!(float(7.514_464_338_823_816e-7).format(Some(7)), "0.0000007");
        assert_eq!(raw_of(&float(1e21)), "1000000000000000000000000000000000000000");
    }

    #[test]
    fn float_non_finite_rejected() {
        assert!(FixedPointAmount::from_f64(f64::NAN).is_err());
        assert!(FixedPointAmount::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn decimal_strings() {
        assert_eq!(raw_of(&fpn("1.005")), "1005000000000000000");
        assert_eq!(raw_of(&fpn("5.")), "5000000000000000000");
        assert_eq!(raw_of(&fpn(".5")), "500000000000000000");
        assert_eq!(raw_of(&fpn("  42  ")), "42000000000000000000");
        assert_eq!(raw_of(&fpn("-0.75")), "-750000000000000000");
    }

    #[test]
    fn lone_dot_and_empty_are_zero() {
        assert!(fpn(".").is_zero());
        assert!(fpn("").is_zero());
        assert!(fpn("   ").is_zero());
    }

    #[test]
    fn fraction_beyond_eighteen_digits_truncates() {
        assert_eq!(raw_of(&fpn("0.1234567890123456789")), "123456789012345678");
        assert_eq!(raw_of(&fpn("-0.9999999999999999999")), "-999999999999999999");
    }

    #[test]
    fn two_dots_rejected() {
        let Err(e) = FixedPointAmount::parse("1.2.3") else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            QuoteError::InvalidNumberFormat("number cannot contain more than one dot")
        );
    }

    #[test]
    fn garbage_rejected() {
        assert!(FixedPointAmount::parse("12a").is_err());
        assert!(FixedPointAmount::parse("1,5").is_err());
        assert!(FixedPointAmount::parse("+1").is_err());
        assert!(FixedPointAmount::parse("-").is_err());
    }

    #[test]
    fn raw_constructor_skips_scaling() {
        let Ok(v) = "-11000000000000000000".parse::<BigInt>() else {
            panic!("valid bigint");
        };
        let a = FixedPointAmount::from_raw(v);
        assert_eq!(a, fpn("-11"));
    }

    #[test]
    fn hex_constructor() {
        let Ok(a) = FixedPointAmount::from_hex("55f9ba352e70b8000", true) else {
            panic!("valid hex");
        };
        assert_eq!(raw_of(&a), "99123000000000000000");

        let Ok(b) = FixedPointAmount::from_hex("0x10", false) else {
            panic!("valid hex");
        };
        assert_eq!(b, FixedPointAmount::from_whole(16));
        assert!(FixedPointAmount::from_hex("zz", true).is_err());
    }

    #[test]
    fn units_round_trip_truncates() {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let a = fpn("1.2345678");
        assert_eq!(a.to_units(d).to_string(), "1234567");
        assert_eq!(FixedPointAmount::from_units(1_234_567u64, d), fpn("1.234567"));
    }

    // -- Arithmetic ---------------------------------------------------------

    #[test]
    fn division_truncates() {
        let wei69 = FixedPointAmount::from_whole(69);
        let Ok(q) = wei69.checked_div(&FixedPointAmount::from_whole(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(raw_of(&q), "23000000000000000000");

        let Ok(r) = FixedPointAmount::from_whole(98).checked_div(&FixedPointAmount::from_whole(99))
        else {
            panic!("expected Ok");
        };
        assert_eq!(raw_of(&r), "989898989898989898");
        assert_eq!(r.to_string(), "0.989898989898989898");
    }

    #[test]
    fn division_by_zero() {
        let Err(e) = FixedPointAmount::one().checked_div(&FixedPointAmount::zero()) else {
            panic!("expected Err");
        };
        assert_eq!(e, QuoteError::DivisionByZero);
    }

    #[test]
    fn multiplication_rescales() {
        let product = &FixedPointAmount::from_whole(69) * &FixedPointAmount::from_whole(3);
        assert_eq!(raw_of(&product), "207000000000000000000");
        assert_eq!(&fpn("0.5") * &fpn("0.5"), fpn("0.25"));
        assert_eq!(&fpn("-2") * &fpn("1.5"), fpn("-3"));
    }

    #[test]
    fn multiplication_truncates_toward_zero() {
        let tiny = FixedPointAmount::from_raw(1);
        assert!((&tiny * &fpn("0.5")).is_zero());
        assert!((&-tiny * &fpn("0.5")).is_zero());
    }

    #[test]
    fn add_sub_neg() {
        assert_eq!(&fpn("1.5") + &fpn("2.25"), fpn("3.75"));
        assert_eq!(&fpn("1.5") - &fpn("2.25"), fpn("-0.75"));
        assert_eq!(-fpn("3"), fpn("-3"));
    }

    #[test]
    fn precision_shifts() {
        let a = FixedPointAmount::from_raw(123_456);
        assert_eq!(raw_of(&a.increase_precision(3)), "123456000");
        assert_eq!(raw_of(&a.decrease_precision(3)), "123");
    }

    #[test]
    fn pow_repeats_multiplication() {
        assert_eq!(fpn("10").pow(0), FixedPointAmount::one());
        assert_eq!(fpn("10").pow(1), fpn("10"));
        assert_eq!(fpn("10").pow(12), FixedPointAmount::from_whole(1_000_000_000_000u64));
        assert_eq!(fpn("0.1").pow(3), fpn("0.001"));
    }

    #[test]
    fn sum_of_amounts() {
        let values = [fpn("1"), fpn("2.5"), fpn("-0.5")];
        let total: FixedPointAmount = values.iter().sum();
        assert_eq!(total, fpn("3"));
        let empty: FixedPointAmount = Vec::<FixedPointAmount>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn comparisons_use_raw() {
        assert!(fpn("1.0000000000000001") > fpn("1"));
        assert!(fpn("-1") < fpn("0"));
        assert_eq!(fpn("2.50"), fpn("2.5"));
        assert!(fpn("3") >= fpn("3"));
    }

    // -- Formatting ---------------------------------------------------------

    #[test]
    fn format_fixed_decimals() {
        assert_eq!(FixedPointAmount::one().format(Some(2)), "1.00");
        assert_eq!(fpn(".5").format(Some(0)), "0");
        assert_eq!(fpn(".5").format(Some(3)), "0.500");
        assert_eq!(fpn(".5").format(Some(20)), "0.50000000000000000000");
        assert_eq!(FixedPointAmount::from_whole(-123).format(Some(10)), "-123.0000000000");
    }

    #[test]
    fn format_full_keeps_eighteen_digits() {
        assert_eq!(fpn("007.25").format(None), "7.250000000000000000");
        assert_eq!(fpn("-123").format(None), "-123.000000000000000000");
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(FixedPointAmount::from_whole(-123).to_string(), "-123");
        assert_eq!(fpn("0.50").to_string(), "0.5");
        assert_eq!(FixedPointAmount::zero().to_string(), "0");
    }

    #[test]
    fn format_round_trip_is_idempotent() {
        for s in ["1.005", "-0.000000000000000001", "123456789.987654321", "."] {
            let once = fpn(s);
            assert_eq!(fpn(&once.format(None)), once);
        }
    }

    #[test]
    fn to_f64_is_approximate() {
        assert!((fpn("2.5").to_f64() - 2.5).abs() < f64::EPSILON);
    }

    // -- Serde --------------------------------------------------------------

    #[test]
    fn serde_as_decimal_string() {
        let Ok(json) = serde_json::to_string(&fpn("1.5")) else {
            panic!("serializable");
        };
        assert_eq!(json, "\"1.500000000000000000\"");
        let Ok(back) = serde_json::from_str::<FixedPointAmount>(&json) else {
            panic!("deserializable");
        };
        assert_eq!(back, fpn("1.5"));
        let Ok(n) = serde_json::from_str::<FixedPointAmount>("7") else {
            panic!("deserializable");
        };
        assert_eq!(n, FixedPointAmount::from_whole(7));
    }
}

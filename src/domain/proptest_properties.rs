//! Property-based tests for [`FixedPointAmount`] arithmetic and formatting.
//!
//! 1. **Normalization**: `parse(s).format(None)` is `s` with the fraction
//!    padded to 18 digits.
//! 2. **Round trip**: formatting and re-parsing is the identity.
//! 3. **Division bound**: `a / b × b` stays within one truncation of `a`.
//! 4. **Multiplication order**: `a × b × c` and `a × c × b` agree within
//!    the truncation of each step.
//! 5. **Unit conversion**: converting to native units loses less than one
//!    unit of the token.

#![allow(clippy::panic)]

use num_bigint::BigInt;
use num_traits::Signed;
use proptest::prelude::*;

use super::{Decimals, FixedPointAmount, SCALE_DIGITS};
use crate::domain::ten_pow;

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Raw amounts spanning dust to roughly 10^20 whole units.
fn raw_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        -1_000_000i128..=1_000_000i128,
        -(10i128.pow(38))..=10i128.pow(38),
    ]
}

/// Non-zero divisors between 0.001 and 10^6 whole units.
fn divisor_strategy() -> impl Strategy<Value = i128> {
    (10i128.pow(15)..=10i128.pow(24)).prop_flat_map(|v| prop_oneof![Just(v), Just(-v)])
}

fn amount(raw: i128) -> FixedPointAmount {
    FixedPointAmount::from_raw(raw)
}

fn scale() -> BigInt {
    ten_pow(SCALE_DIGITS)
}

// ---------------------------------------------------------------------------
// Properties 1-2: parsing and formatting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_format_normalizes_typed_input(
        negative in any::<bool>(),
        whole in any::<u64>(),
        fraction in "[0-9]{0,18}",
    ) {
        let sign = if negative { "-" } else { "" };
        let typed = format!("{sign}{whole}.{fraction}");
        let Ok(parsed) = FixedPointAmount::parse(&typed) else {
            panic!("valid decimal: {typed}");
        };

        let padded = format!("{fraction:0<18}");
        let is_zero = whole == 0 && padded.bytes().all(|b| b == b'0');
        let expected = if is_zero {
            format!("0.{padded}")
        } else {
            format!("{sign}{whole}.{padded}")
        };
        prop_assert_eq!(parsed.format(None), expected);
    }

    #[test]
    fn prop_format_parse_round_trip(
        whole in "-?[0-9]{1,30}",
        fraction in "[0-9]{0,30}",
    ) {
        let Ok(first) = FixedPointAmount::parse(&format!("{whole}.{fraction}")) else {
            panic!("valid decimal");
        };
        let Ok(second) = FixedPointAmount::parse(&first.format(None)) else {
            panic!("formatted output must parse");
        };
        prop_assert_eq!(&second, &first);
        let Ok(third) = first.to_string().parse::<FixedPointAmount>() else {
            panic!("display output must parse");
        };
        prop_assert_eq!(third, first);
    }
}

// ---------------------------------------------------------------------------
// Properties 3-4: arithmetic bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_div_then_mul_within_truncation(
        a in raw_strategy(),
        b in divisor_strategy(),
    ) {
        let (a, b) = (amount(a), amount(b));
        let Ok(quotient) = a.checked_div(&b) else {
            panic!("divisor is non-zero");
        };
        let back = &quotient * &b;
        let error = (back.raw() - a.raw()).abs();
        let bound = b.raw().abs() / scale() + 1;
        prop_assert!(error <= bound, "error {} exceeds {}", error, bound);
    }

    #[test]
    fn prop_mul_order_within_truncation(
        a in raw_strategy(),
        b in divisor_strategy(),
        c in divisor_strategy(),
    ) {
        let (a, b, c) = (amount(a), amount(b), amount(c));
        let left = &(&a * &b) * &c;
        let right = &(&a * &c) * &b;
        let error = (left.raw() - right.raw()).abs();
        let bound = b.raw().abs() / scale() + c.raw().abs() / scale() + 2;
        prop_assert!(error <= bound, "error {} exceeds {}", error, bound);
    }

    #[test]
    fn prop_mul_by_one_is_identity(a in raw_strategy()) {
        let a = amount(a);
        prop_assert_eq!(&a * &FixedPointAmount::one(), a.clone());
        let Ok(q) = a.checked_div(&FixedPointAmount::one()) else {
            panic!("one is non-zero");
        };
        prop_assert_eq!(q, a);
    }
}

// ---------------------------------------------------------------------------
// Property 5: native units
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unit_conversion_loses_less_than_one_unit(
        raw in 0i128..=10i128.pow(38),
        decimals in 0u8..=18u8,
    ) {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("decimals in range");
        };
        let value = amount(raw);
        let restored = FixedPointAmount::from_units(value.to_units(d), d);
        prop_assert!(restored <= value);
        let loss = value.raw() - restored.raw();
        prop_assert!(loss < d.scale_gap());
    }
}

//! Constant-product (`x × y = k`) swap math with the Uniswap V2 fee model.
//!
//! The fee is applied by scaling the input by `(10 000 − fee_bps) / 10 000`
//! before the pricing formula, exactly as the V2 router library does, so
//! quotes match `getAmountOut` / `getAmountIn` to the last unit.
//!
//! # Exact input
//!
//! ```text
//! in_with_fee = amount_in × (10 000 − fee_bps)
//! amount_out  = in_with_fee × reserve_out / (reserve_in × 10 000 + in_with_fee)
//! ```
//!
//! With `fee_bps = 0` this reduces to
//! `reserve_out − reserve_in × reserve_out / (reserve_in + amount_in)`
//! up to integer truncation.
//!
//! # Exact output
//!
//! ```text
//! amount_in = reserve_in × amount_out × 10 000
//!             / ((reserve_out − amount_out) × (10 000 − fee_bps)) + 1
//! ```

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::domain::BasisPoints;
use crate::error::QuoteError;

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: u32 = 10_000;

fn fee_multiplier(fee: BasisPoints) -> Result<BigUint, QuoteError> {
    BPS_DENOMINATOR
        .checked_sub(fee.get())
        .filter(|m| *m > 0)
        .map(BigUint::from)
        .ok_or_else(|| QuoteError::InvalidConfiguration(format!("pair fee {fee} must be below 100%")))
}

/// Returns the output for selling exactly `amount_in` into the pool.
///
/// # Errors
///
/// - [`QuoteError::InsufficientReserves`] if either reserve is zero.
/// - [`QuoteError::InsufficientInputAmount`] if `amount_in` is zero or too
///   small to move one unit of output.
/// - [`QuoteError::InvalidConfiguration`] if `fee` is 100% or more.
pub fn get_amount_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    fee: BasisPoints,
) -> Result<BigUint, QuoteError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::InsufficientReserves);
    }
    if amount_in.is_zero() {
        return Err(QuoteError::InsufficientInputAmount);
    }

    let in_with_fee = amount_in * fee_multiplier(fee)?;
    let numerator = &in_with_fee * reserve_out;
    let denominator = reserve_in * BigUint::from(BPS_DENOMINATOR) + &in_with_fee;
    let amount_out = numerator / denominator;

    if amount_out.is_zero() {
        return Err(QuoteError::InsufficientInputAmount);
    }
    Ok(amount_out)
}

/// Returns the input needed to buy exactly `amount_out` from the pool.
///
/// The result is rounded up by one unit so the pool never under-receives.
///
/// # Errors
///
/// - [`QuoteError::InsufficientReserves`] if either reserve is zero or
///   `amount_out` is not strictly below `reserve_out`.
/// - [`QuoteError::InsufficientInputAmount`] if `amount_out` is zero.
/// - [`QuoteError::InvalidConfiguration`] if `fee` is 100% or more.
pub fn get_amount_in(
    amount_out: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    fee: BasisPoints,
) -> Result<BigUint, QuoteError> {
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(QuoteError::InsufficientReserves);
    }
    if amount_out.is_zero() {
        return Err(QuoteError::InsufficientInputAmount);
    }

    let numerator = reserve_in * amount_out * BigUint::from(BPS_DENOMINATOR);
    let denominator = (reserve_out - amount_out) * fee_multiplier(fee)?;
    Ok(numerator / denominator + BigUint::one())
}

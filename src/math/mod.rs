//! Integer pricing math for AMM pairs.
//!
//! All functions operate on raw base-unit amounts as [`BigUint`](num_bigint::BigUint)
//! so intermediate products of 112-bit reserves never overflow.

mod constant_product;

pub use constant_product::{get_amount_in, get_amount_out};

//! Deterministic pair contract addresses.
//!
//! Uniswap V2 style factories deploy each pair with `CREATE2`, salted by
//! the two sorted token addresses, so the pool address is known without
//! querying the chain:
//!
//! ```text
//! salt    = keccak256(token0 ‖ token1)
//! address = keccak256(0xff ‖ factory ‖ salt ‖ init_code_hash)[12..]
//! ```

use sha3::{Digest, Keccak256};

use crate::domain::TokenAddress;

/// Computes the pair contract address for `token_a` / `token_b`.
///
/// The tokens may be passed in either order.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::TokenAddress;
/// use exchange_quote::graph::compute_pair_address;
///
/// let factory: TokenAddress = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f".parse().expect("hex");
/// let init_code_hash = [0u8; 32];
/// let a = TokenAddress::from_bytes([1u8; 20]);
/// let b = TokenAddress::from_bytes([2u8; 20]);
/// assert_eq!(
///     compute_pair_address(&factory, &init_code_hash, &a, &b),
///     compute_pair_address(&factory, &init_code_hash, &b, &a),
/// );
/// ```
#[must_use]
pub fn compute_pair_address(
    factory: &TokenAddress,
    init_code_hash: &[u8; 32],
    token_a: &TokenAddress,
    token_b: &TokenAddress,
) -> TokenAddress {
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    let salt = Keccak256::new()
        .chain_update(token0.as_bytes())
        .chain_update(token1.as_bytes())
        .finalize();

    let digest = Keccak256::new()
        .chain_update([0xffu8])
        .chain_update(factory.as_bytes())
        .chain_update(salt)
        .chain_update(init_code_hash)
        .finalize();

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    TokenAddress::from_bytes(bytes)
}

//! Candidate token pairs worth looking up for a trade.

use std::collections::HashSet;

use crate::config::NetworkConfig;
use crate::domain::{Token, TokenAddress};

/// Returns every pair that could take part in a route from `token_a` to
/// `token_b` on `network`.
///
/// The bases are the network's bridge tokens followed by the additional
/// bases of either trade token. Candidates are emitted in this order:
///
/// 1. the direct pair;
/// 2. `token_a` against each base;
/// 3. `token_b` against each base;
/// 4. each base against each base.
///
/// Self-pairs are dropped. A token with custom bases only pairs with those
/// bases. Repeats of an unordered pair keep their first position.
#[must_use]
pub fn all_currency_combinations(
    network: &NetworkConfig,
    token_a: &Token,
    token_b: &Token,
) -> Vec<(Token, Token)> {
    let mut bases = network.bridge_tokens();
    bases.extend(network.additional_bases(&token_a.address()));
    bases.extend(network.additional_bases(&token_b.address()));

    let candidates = core::iter::once((*token_a, *token_b))
        .chain(bases.iter().map(|base| (*token_a, *base)))
        .chain(bases.iter().map(|base| (*token_b, *base)))
        .chain(
            bases
                .iter()
                .flat_map(|base| bases.iter().map(move |other| (*base, *other))),
        );

    let mut seen: HashSet<(TokenAddress, TokenAddress)> = HashSet::new();
    candidates
        .filter(|(t0, t1)| t0.address() != t1.address())
        .filter(|(t0, t1)| allowed_by_custom_bases(network, t0, t1))
        .filter(|(t0, t1)| {
            let (lo, hi) = if t0.address() < t1.address() {
                (t0.address(), t1.address())
            } else {
                (t1.address(), t0.address())
            };
            seen.insert((lo, hi))
        })
        .collect()
}

fn allowed_by_custom_bases(network: &NetworkConfig, t0: &Token, t1: &Token) -> bool {
    let pairs_with = |token: &Token, bases: Option<Vec<Token>>| match bases {
        Some(list) => list.iter().any(|b| b.address() == token.address()),
        None => true,
    };
    pairs_with(t1, network.custom_bases(&t0.address()))
        && pairs_with(t0, network.custom_bases(&t1.address()))
}

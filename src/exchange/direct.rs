//! Mint, redeem and synthetic exchange against the collateral.
//!
//! Collateral figures are truncated to the collateral token's own decimals
//! wherever the contracts hold them in base units: the gross collateral of a
//! redeem or exchange and the fee taken from it. A mint's collateral is the
//! typed amount and is used as is.
//!
//! The backward direction (the user fixed the receive amount) has no closed
//! form once truncation is involved. It is solved as the smallest pay amount,
//! on the pay asset's decimal grid, whose forward quote reaches the target.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::domain::{Decimals, FixedPointAmount};
use crate::error::{QuoteError, Result};

/// Doubling rounds before the backward search gives up.
const SEARCH_LIMIT: u32 = 256;

/// Truncates `amount` to `decimals` fractional digits.
#[must_use]
pub fn truncate_to(amount: &FixedPointAmount, decimals: Decimals) -> FixedPointAmount {
    FixedPointAmount::from_units(amount.to_units(decimals), decimals)
}

/// Collateral backing `tokens` synthetics at `price`, truncated to the
/// collateral's base units.
#[must_use]
pub fn collateral_for(
    tokens: &FixedPointAmount,
    price: &FixedPointAmount,
    collateral_decimals: Decimals,
) -> FixedPointAmount {
    truncate_to(&(tokens * price), collateral_decimals)
}

/// Synthetic tokens bought by `collateral` at `price`.
///
/// # Errors
///
/// Returns [`QuoteError::DivisionByZero`] if `price` is zero.
pub fn tokens_for(collateral: &FixedPointAmount, price: &FixedPointAmount) -> Result<FixedPointAmount> {
    collateral.checked_div(price)
}

/// Figures of one collateral-side computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectQuote {
    pay: FixedPointAmount,
    receive: FixedPointAmount,
    fee: FixedPointAmount,
    gross_collateral: FixedPointAmount,
    net_collateral: FixedPointAmount,
    transaction_collateral: FixedPointAmount,
}

impl DirectQuote {
    /// All-zero quote.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            pay: FixedPointAmount::zero(),
            receive: FixedPointAmount::zero(),
            fee: FixedPointAmount::zero(),
            gross_collateral: FixedPointAmount::zero(),
            net_collateral: FixedPointAmount::zero(),
            transaction_collateral: FixedPointAmount::zero(),
        }
    }

    /// Amount paid.
    #[must_use]
    pub const fn pay(&self) -> &FixedPointAmount {
        &self.pay
    }

    /// Amount received.
    #[must_use]
    pub const fn receive(&self) -> &FixedPointAmount {
        &self.receive
    }

    /// Protocol fee in collateral.
    #[must_use]
    pub const fn fee(&self) -> &FixedPointAmount {
        &self.fee
    }

    /// Collateral before the fee.
    #[must_use]
    pub const fn gross_collateral(&self) -> &FixedPointAmount {
        &self.gross_collateral
    }

    /// Collateral after the fee.
    #[must_use]
    pub const fn net_collateral(&self) -> &FixedPointAmount {
        &self.net_collateral
    }

    /// Collateral amount the transaction is submitted with.
    #[must_use]
    pub const fn transaction_collateral(&self) -> &FixedPointAmount {
        &self.transaction_collateral
    }

    fn with_receive(mut self, receive: FixedPointAmount) -> Self {
        self.receive = receive;
        self
    }
}

/// Prices mint, redeem and exchange for one fee and collateral.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{Decimals, FixedPointAmount};
/// use exchange_quote::exchange::DirectPricer;
///
/// let d = |s: &str| FixedPointAmount::parse(s).expect("valid");
/// let pricer = DirectPricer::new(d("0.0015"), Decimals::new(6).expect("valid"));
///
/// let quote = pricer.exchange(&d("100"), &d("1.10"), &d("0.95")).expect("priced");
/// assert_eq!(quote.receive().to_string(), "115.615789473684210526");
/// assert_eq!(quote.fee().to_string(), "0.165");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectPricer {
    fee_percentage: FixedPointAmount,
    collateral_decimals: Decimals,
}

impl DirectPricer {
    /// Creates a pricer charging `fee_percentage` on a collateral with
    /// `collateral_decimals` decimals.
    #[must_use]
    pub const fn new(fee_percentage: FixedPointAmount, collateral_decimals: Decimals) -> Self {
        Self {
            fee_percentage,
            collateral_decimals,
        }
    }

    /// Returns the collateral decimals.
    #[must_use]
    pub const fn collateral_decimals(&self) -> Decimals {
        self.collateral_decimals
    }

    fn fee_on_base_units(&self, gross: &FixedPointAmount) -> FixedPointAmount {
        truncate_to(&(gross * &self.fee_percentage), self.collateral_decimals)
    }

    // -- Forward ------------------------------------------------------------

    /// Mints with `pay` collateral at the synthetic's `price`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `price` is zero.
    pub fn mint(&self, pay: &FixedPointAmount, price: &FixedPointAmount) -> Result<DirectQuote> {
        let fee = pay * &self.fee_percentage;
        let net = pay - &fee;
        let receive = tokens_for(&net, price)?;
        Ok(DirectQuote {
            pay: pay.clone(),
            receive,
            fee,
            gross_collateral: pay.clone(),
            transaction_collateral: net.clone(),
            net_collateral: net,
        })
    }

    /// Redeems `pay` synthetics at `price` for collateral.
    #[must_use]
    pub fn redeem(&self, pay: &FixedPointAmount, price: &FixedPointAmount) -> DirectQuote {
        let gross = collateral_for(pay, price, self.collateral_decimals);
        let fee = self.fee_on_base_units(&gross);
        let net = &gross - &fee;
        DirectQuote {
            pay: pay.clone(),
            receive: net.clone(),
            fee,
            transaction_collateral: gross.clone(),
            gross_collateral: gross,
            net_collateral: net,
        }
    }

    /// Exchanges `pay` synthetics priced `pay_price` into the synthetic
    /// priced `receive_price`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `receive_price` is zero.
    pub fn exchange(
        &self,
        pay: &FixedPointAmount,
        pay_price: &FixedPointAmount,
        receive_price: &FixedPointAmount,
    ) -> Result<DirectQuote> {
        let redeemed = self.redeem(pay, pay_price);
        let receive = tokens_for(redeemed.net_collateral(), receive_price)?;
        Ok(redeemed.with_receive(receive))
    }

    // -- Backward -----------------------------------------------------------

    /// Collateral needed to mint `receive` synthetics; the collateral is on
    /// the collateral's decimal grid.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `price` is zero, or
    /// [`QuoteError::InsufficientInputAmount`] if no amount reaches `receive`.
    pub fn mint_for(&self, receive: &FixedPointAmount, price: &FixedPointAmount) -> Result<DirectQuote> {
        let value = receive * price;
        let seed = &value + &(&value * &self.fee_percentage);
        let pay = minimal_pay(receive, self.collateral_decimals, &seed, |p| {
            Ok(self.mint(p, price)?.receive)
        })?;
        Ok(self.mint(&pay, price)?.with_receive(receive.clone()))
    }

    /// Synthetics to redeem for at least `receive` collateral, on the
    /// `pay_decimals` grid.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if `price` is zero, or
    /// [`QuoteError::InsufficientInputAmount`] if no amount reaches `receive`.
    pub fn redeem_for(
        &self,
        receive: &FixedPointAmount,
        price: &FixedPointAmount,
        pay_decimals: Decimals,
    ) -> Result<DirectQuote> {
        let kept = &FixedPointAmount::one() - &self.fee_percentage;
        let seed = receive.checked_div(&(price * &kept))?;
        let pay = minimal_pay(receive, pay_decimals, &seed, |p| {
            Ok(self.redeem(p, price).receive)
        })?;
        Ok(self.redeem(&pay, price).with_receive(receive.clone()))
    }

    /// Synthetics priced `pay_price` needed for at least `receive` of the
    /// synthetic priced `receive_price`, on the `pay_decimals` grid.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DivisionByZero`] if a price is zero, or
    /// [`QuoteError::InsufficientInputAmount`] if no amount reaches `receive`.
    pub fn exchange_for(
        &self,
        receive: &FixedPointAmount,
        pay_price: &FixedPointAmount,
        receive_price: &FixedPointAmount,
        pay_decimals: Decimals,
    ) -> Result<DirectQuote> {
        let value = receive * receive_price;
        let seed = (&value + &(&value * &self.fee_percentage)).checked_div(pay_price)?;
        let pay = minimal_pay(receive, pay_decimals, &seed, |p| {
            Ok(self.exchange(p, pay_price, receive_price)?.receive)
        })?;
        Ok(self
            .exchange(&pay, pay_price, receive_price)?
            .with_receive(receive.clone()))
    }
}

/// Smallest amount on the `decimals` grid whose `forward` value reaches
/// `target`. `forward` must be non-decreasing.
///
/// Starts from `seed`, gallops outward until the answer is bracketed, then
/// bisects.
fn minimal_pay<F>(
    target: &FixedPointAmount,
    decimals: Decimals,
    seed: &FixedPointAmount,
    forward: F,
) -> Result<FixedPointAmount>
where
    F: Fn(&FixedPointAmount) -> Result<FixedPointAmount>,
{
    let reaches = |units: &BigInt| -> Result<bool> {
        Ok(forward(&FixedPointAmount::from_units(units.clone(), decimals))? >= *target)
    };

    let start = seed.to_units(decimals).max(BigInt::zero());
    let mut step = BigInt::one();
    let mut rounds = 0;

    // lo never reaches the target, hi always does
    let (mut lo, mut hi) = if reaches(&start)? {
        let mut hi = start;
        loop {
            if hi.is_zero() {
                return Ok(FixedPointAmount::zero());
            }
            let candidate = (&hi - &step).max(BigInt::zero());
            if !reaches(&candidate)? {
                break (candidate, hi);
            }
            hi = candidate;
            step *= 2;
        }
    } else {
        let mut lo = start;
        loop {
            let candidate = &lo + &step;
            if reaches(&candidate)? {
                break (lo, candidate);
            }
            rounds += 1;
            if rounds > SEARCH_LIMIT {
                return Err(QuoteError::InsufficientInputAmount);
            }
            lo = candidate;
            step *= 2;
        }
    };

    while &hi - &lo > BigInt::one() {
        let mid: BigInt = (&lo + &hi) / 2;
        if reaches(&mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(FixedPointAmount::from_units(hi, decimals))
}

//! Exchange request and its classification.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::QuoteConfig;
use crate::domain::{AssetDescriptor, AssetRole, BasisPoints, FixedPointAmount, Side};
use crate::routing::MAX_HOPS;

/// Default protocol fee, 0.2%.
const DEFAULT_FEE_RAW: u64 = 2_000_000_000_000_000;

/// Default slippage tolerance, 0.5%.
pub const DEFAULT_SLIPPAGE: BasisPoints = BasisPoints::new(50);

/// How a request is served, decided once from the two asset roles.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::AssetRole;
/// use exchange_quote::exchange::RequestKind;
///
/// let kind = RequestKind::classify(AssetRole::NativeCoin, AssetRole::Synthetic);
/// assert_eq!(kind, RequestKind::Mint { has_amm_leg: true });
/// assert!(kind.has_amm_leg());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Synthetic to synthetic through the collateral.
    DirectExchange,
    /// Collateral, or an AMM-reachable asset, into a synthetic.
    Mint {
        /// The pay asset is swapped into collateral first.
        has_amm_leg: bool,
    },
    /// A synthetic into collateral, or into an AMM-reachable asset.
    Redeem {
        /// The redeemed collateral is swapped afterwards.
        has_amm_leg: bool,
    },
    /// No protocol path connects the two assets.
    Unsupported,
}

impl RequestKind {
    /// Classifies a pay/receive role combination.
    #[must_use]
    pub const fn classify(pay: AssetRole, receive: AssetRole) -> Self {
        match (pay, receive) {
            (AssetRole::Synthetic, AssetRole::Synthetic) => Self::DirectExchange,
            (AssetRole::Collateral, AssetRole::Synthetic) => Self::Mint { has_amm_leg: false },
            (AssetRole::External | AssetRole::NativeCoin, AssetRole::Synthetic) => {
                Self::Mint { has_amm_leg: true }
            }
            (AssetRole::Synthetic, AssetRole::Collateral) => Self::Redeem { has_amm_leg: false },
            (AssetRole::Synthetic, AssetRole::External | AssetRole::NativeCoin) => {
                Self::Redeem { has_amm_leg: true }
            }
            _ => Self::Unsupported,
        }
    }

    /// Returns `true` if an AMM trade participates.
    #[must_use]
    pub const fn has_amm_leg(&self) -> bool {
        matches!(
            self,
            Self::Mint { has_amm_leg: true } | Self::Redeem { has_amm_leg: true }
        )
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectExchange => write!(f, "exchange"),
            Self::Mint { has_amm_leg: false } => write!(f, "mint"),
            Self::Mint { has_amm_leg: true } => write!(f, "swap-and-mint"),
            Self::Redeem { has_amm_leg: false } => write!(f, "redeem"),
            Self::Redeem { has_amm_leg: true } => write!(f, "redeem-and-swap"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One quote request: which side the user typed, the two assets, and the
/// knobs that shape the answer.
///
/// The amount stays a string until the quote is computed so that a caller
/// can forward raw user input; parsing it is the only failure a quote can
/// report.
///
/// # Examples
///
/// ```
/// use exchange_quote::domain::{AssetDescriptor, AssetRole, Decimals, Side};
/// use exchange_quote::exchange::{ExchangeRequest, RequestKind};
///
/// let usdc = AssetDescriptor::new("USDC", Decimals::new(6).expect("valid"), AssetRole::Collateral);
/// let jeur = AssetDescriptor::new("jEUR", Decimals::MAX, AssetRole::Synthetic)
///     .with_pair_key("EURUSD");
///
/// let request = ExchangeRequest::new(Side::Pay, usdc, jeur, "100");
/// assert_eq!(request.kind(), RequestKind::Mint { has_amm_leg: false });
/// assert_eq!(request.fee_percentage().to_string(), "0.002");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeRequest {
    base: Side,
    pay_asset: AssetDescriptor,
    receive_asset: AssetDescriptor,
    amount: String,
    fee_percentage: FixedPointAmount,
    slippage_bps: BasisPoints,
    max_hops: usize,
}

impl ExchangeRequest {
    /// Creates a request with the default fee, slippage and hop budget.
    #[must_use]
    pub fn new(
        base: Side,
        pay_asset: AssetDescriptor,
        receive_asset: AssetDescriptor,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            base,
            pay_asset,
            receive_asset,
            amount: amount.into(),
            fee_percentage: FixedPointAmount::from_raw(DEFAULT_FEE_RAW),
            slippage_bps: DEFAULT_SLIPPAGE,
            max_hops: MAX_HOPS,
        }
    }

    /// Takes fee, slippage and hop budget from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &QuoteConfig) -> Self {
        self.fee_percentage = config.fee_percentage().clone();
        self.slippage_bps = config.slippage();
        self.max_hops = config.effective_max_hops();
        self
    }

    /// Sets the protocol fee as a fraction (`0.002` is 0.2%).
    #[must_use]
    pub fn with_fee_percentage(mut self, fee: FixedPointAmount) -> Self {
        self.fee_percentage = fee;
        self
    }

    /// Sets the AMM slippage tolerance.
    #[must_use]
    pub const fn with_slippage(mut self, slippage: BasisPoints) -> Self {
        self.slippage_bps = slippage;
        self
    }

    /// Sets the AMM hop budget.
    #[must_use]
    pub const fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Replaces the typed amount.
    #[must_use]
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Returns the side the amount was typed on.
    #[must_use]
    pub const fn base(&self) -> Side {
        self.base
    }

    /// Returns the asset being paid.
    #[must_use]
    pub const fn pay_asset(&self) -> &AssetDescriptor {
        &self.pay_asset
    }

    /// Returns the asset being received.
    #[must_use]
    pub const fn receive_asset(&self) -> &AssetDescriptor {
        &self.receive_asset
    }

    /// Returns the typed amount, unparsed.
    #[must_use]
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Returns the protocol fee fraction.
    #[must_use]
    pub const fn fee_percentage(&self) -> &FixedPointAmount {
        &self.fee_percentage
    }

    /// Returns the slippage tolerance.
    #[must_use]
    pub const fn slippage(&self) -> BasisPoints {
        self.slippage_bps
    }

    /// Returns the AMM hop budget.
    #[must_use]
    pub const fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Classifies the request. Paying and receiving the same asset is
    /// [`RequestKind::Unsupported`].
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        if self.pay_asset.symbol() == self.receive_asset.symbol() {
            return RequestKind::Unsupported;
        }
        RequestKind::classify(self.pay_asset.role(), self.receive_asset.role())
    }
}

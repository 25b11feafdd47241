//! Command-line quoting against a TOML market snapshot.
//!
//! ```text
//! quote --market market.toml --pay USDC --receive jEUR:synthetic:18:EURUSD --amount 100
//! ```
//!
//! An asset is either the network collateral's symbol or a string of the form
//! `SYMBOL:ROLE:DECIMALS[:PAIR_KEY|:0xADDRESS]...`, where `ROLE` is one of
//! `synthetic`, `collateral`, `external` or `native`.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exchange_quote::config::{NetworkConfig, QuoteConfig};
use exchange_quote::domain::{
    AssetDescriptor, AssetRole, BasisPoints, ChainId, Decimals, Side, TokenAddress,
};
use exchange_quote::exchange::{ExchangeCalculator, ExchangeRequest};
use exchange_quote::snapshot::MarketSnapshot;

#[derive(Parser, Debug)]
#[command(name = "quote")]
#[command(version, about = "Quote a synthetic exchange, mint or redeem against a market snapshot")]
struct Args {
    /// Path to a quote config TOML (defaults to the bundled networks)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the market snapshot TOML (prices, reserves, pending pairs)
    #[arg(short, long)]
    market: PathBuf,

    /// Chain to quote on (defaults to the snapshot's chain)
    #[arg(long)]
    chain: Option<u64>,

    /// Asset paid, as a collateral symbol or SYMBOL:ROLE:DECIMALS[:KEY|:0xADDR]
    #[arg(long)]
    pay: String,

    /// Asset received, same format as --pay
    #[arg(long)]
    receive: String,

    /// Amount typed by the user
    #[arg(short, long)]
    amount: String,

    /// Which side the amount was typed on
    #[arg(long, value_enum, default_value_t = TypedSide::Pay)]
    base: TypedSide,

    /// Slippage tolerance in basis points (overrides config)
    #[arg(long)]
    slippage_bps: Option<u32>,

    /// Maximum number of AMM hops (overrides config)
    #[arg(long)]
    max_hops: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TypedSide {
    Pay,
    Receive,
}

impl From<TypedSide> for Side {
    fn from(side: TypedSide) -> Self {
        match side {
            TypedSide::Pay => Self::Pay,
            TypedSide::Receive => Self::Receive,
        }
    }
}

fn parse_role(text: &str) -> Result<AssetRole> {
    match text.to_ascii_lowercase().as_str() {
        "synthetic" | "synth" => Ok(AssetRole::Synthetic),
        "collateral" => Ok(AssetRole::Collateral),
        "external" | "erc20" => Ok(AssetRole::External),
        "native" | "native_coin" => Ok(AssetRole::NativeCoin),
        other => bail!("unknown asset role '{other}'"),
    }
}

fn parse_asset(text: &str, network: &NetworkConfig) -> Result<AssetDescriptor> {
    if let Some(collateral) = network.collateral() {
        if collateral.symbol().eq_ignore_ascii_case(text) {
            return Ok(collateral.clone());
        }
    }

    let mut fields = text.split(':');
    let symbol = fields.next().filter(|s| !s.is_empty()).ok_or_else(|| anyhow!("empty asset"))?;
    let role = parse_role(fields.next().ok_or_else(|| anyhow!("asset '{symbol}' has no role"))?)?;
    let decimals: u8 = fields
        .next()
        .ok_or_else(|| anyhow!("asset '{symbol}' has no decimals"))?
        .parse()
        .with_context(|| format!("decimals of asset '{symbol}'"))?;
    let decimals = Decimals::new(decimals).with_context(|| format!("decimals of asset '{symbol}'"))?;

    let mut asset = AssetDescriptor::new(symbol, decimals, role);
    for extra in fields {
        asset = if extra.starts_with("0x") {
            let address = TokenAddress::parse(extra)
                .with_context(|| format!("address of asset '{symbol}'"))?;
            asset.with_address(address)
        } else {
            asset.with_pair_key(extra)
        };
    }
    Ok(asset)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => QuoteConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => QuoteConfig::builtin().context("loading bundled config")?,
    };
    if let Some(bps) = args.slippage_bps {
        config = config.with_slippage(BasisPoints::new(bps));
    }
    if let Some(hops) = args.max_hops {
        config = config.with_max_hops(hops);
    }

    let market = MarketSnapshot::load(&args.market)
        .with_context(|| format!("loading market {}", args.market.display()))?;
    let chain_id = args.chain.map_or_else(|| market.chain_id(), ChainId::new);
    let (prices, reserves) = market.into_snapshots().context("reading market snapshot")?;

    let network = config
        .network(chain_id)
        .ok_or_else(|| anyhow!("no network configured for chain {chain_id}"))?;
    let pay = parse_asset(&args.pay, network).context("parsing --pay")?;
    let receive = parse_asset(&args.receive, network).context("parsing --receive")?;
    info!(network = network.name(), pay = pay.symbol(), receive = receive.symbol(), "quoting");

    let request = ExchangeRequest::new(args.base.into(), pay, receive, args.amount);
    let result = ExchangeCalculator::new(&config)
        .quote(&request, chain_id, &prices, &reserves)
        .context("computing quote")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

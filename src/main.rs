use anyhow::{anyhow, Context, Result};
use bs_valuation::{
    default_configs, logging, price_request, report_batch, DiscreteDividendSet,
    DividendMode, PricerConfig, PricingRequest,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bs-valuation", version, about = "Black-Scholes option valuation calculator")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price the illustrative scenarios: no dividends, discrete dividends, 4% yield
    Demo,
    /// Price a single option
    Price(PriceArgs),
    /// Price every request listed in a TOML config file
    Batch {
        /// Path to the config file
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PriceArgs {
    /// Spot price of the underlying
    #[arg(long)]
    spot: f64,
    /// Strike price
    #[arg(long)]
    strike: f64,
    /// Time to maturity in years
    #[arg(long)]
    time: f64,
    /// Risk-free rate, e.g. 0.08
    #[arg(long, allow_hyphen_values = true)]
    rate: f64,
    /// Volatility, e.g. 0.25
    #[arg(long)]
    vol: f64,
    /// Dividend mode: none, discrete (D) or continuous (C)
    #[arg(long, default_value = "none")]
    mode: String,
    /// Discrete dividend as AMOUNT:TIME, repeatable
    #[arg(long = "dividend", value_parser = parse_dividend)]
    dividends: Vec<(f64, f64)>,
    /// Continuous dividend yield
    #[arg(long = "yield", allow_hyphen_values = true)]
    dividend_yield: Option<f64>,
    /// Suppress the printed prices
    #[arg(long)]
    quiet: bool,
}

fn parse_dividend(s: &str) -> std::result::Result<(f64, f64), String> {
    let (amount, time) = s
        .split_once(':')
        .ok_or_else(|| format!("expected AMOUNT:TIME, got '{}'", s))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad dividend amount '{}': {}", amount, e))?;
    let time = time
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad dividend time '{}': {}", time, e))?;
    Ok((amount, time))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Batch { config } => PricerConfig::load(config)?,
        _ => default_configs::interactive(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init_logging(level)?;

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Price(args) => run_price(args),
        Commands::Batch { .. } => run_batch(&config),
    }
}

fn run_demo() -> Result<()> {
    // $100 share price, $90 strike, 9 month maturity, 8% rate, 25% volatility
    let base = PricingRequest::new(100.0, 90.0, 0.75, 0.08, 0.25).with_display(true);

    println!("*** No Dividends ***");
    price_request(&base)?;

    // $1 dividend in month 1 and $1.50 dividend in month 7
    println!("\n*** Discrete Dividends ***");
    let divs = DiscreteDividendSet::new()
        .with(1.0, 1.0 / 12.0)
        .with(1.5, 7.0 / 12.0);
    price_request(&base.clone().with_discrete_dividends(divs))?;

    println!("\n*** Continuous Dividends ***");
    price_request(&base.with_dividend_yield(0.04))?;

    Ok(())
}

fn run_price(args: PriceArgs) -> Result<()> {
    let request = build_request(&args)?;
    price_request(&request.with_display(!args.quiet)).context("pricing failed")?;
    Ok(())
}

/// Turns the `price` arguments into a request, rejecting dividend flags that do not
/// belong to the chosen mode.
fn build_request(args: &PriceArgs) -> Result<PricingRequest> {
    let mode: DividendMode = args.mode.parse()?;
    let request = PricingRequest::new(args.spot, args.strike, args.time, args.rate, args.vol);

    if mode != DividendMode::Discrete && !args.dividends.is_empty() {
        return Err(anyhow!("--dividend is only valid with discrete dividends (mode is {})", mode));
    }
    if mode != DividendMode::Continuous && args.dividend_yield.is_some() {
        return Err(anyhow!("--yield is only valid with continuous dividends (mode is {})", mode));
    }

    Ok(match mode {
        DividendMode::None => request,
        DividendMode::Discrete => {
            let set: DiscreteDividendSet = args.dividends.iter().copied().collect();
            request.with_discrete_dividends(set)
        }
        DividendMode::Continuous => {
            let q = args
                .dividend_yield
                .ok_or_else(|| anyhow!("--yield is required with continuous dividends"))?;
            request.with_dividend_yield(q)
        }
    })
}

fn run_batch(config: &PricerConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let results = report_batch(config, &mut stdout.lock()).context("failed to write batch report")?;
    let mut failures = 0usize;

    for (i, result) in results.iter().enumerate() {
        if let Err(e) = result {
            failures += 1;
            eprintln!("Request {} failed: {}", i + 1, e);
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{} of {} requests failed",
            failures,
            config.requests.len()
        ));
    }
    Ok(())
}

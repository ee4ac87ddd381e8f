//! # bs-valuation: Black-Scholes Fair Values for European Options
//!
//! `bs-valuation` prices European calls and puts with the Black-Scholes closed form. Dividends
//! can be ignored, modelled as discrete cash payments (escrowed-dividend model) or as a
//! continuous yield.
//!
//! ## Core Features
//!
//! - **Closed-form pricing**: call from the Black-Scholes formula, put from put-call parity
//! - **Dividend treatments**: none, discrete cash schedule, continuous yield
//! - **Strict validation**: every bad input fails with [`PricingError::InvalidInput`]
//! - **Optional display**: 4-decimal text output kept apart from the numeric result
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_valuation::{price, DiscreteDividendSet, DividendData, DividendMode};
//!
//! // $100 spot, $90 strike, 9 months, 8% rate, 25% volatility
//! let plain = price(100.0, 90.0, 0.75, 0.08, 0.25, DividendMode::None, None)?;
//!
//! // $1 paid in month 1 and $1.50 in month 7
//! let divs = DividendData::from(DiscreteDividendSet::new().with(1.0, 1.0 / 12.0).with(1.5, 7.0 / 12.0));
//! let with_divs = price(100.0, 90.0, 0.75, 0.08, 0.25, DividendMode::Discrete, Some(&divs))?;
//!
//! assert!(with_divs.call < plain.call);
//! assert!(with_divs.put > plain.put);
//! # Ok::<(), bs_valuation::PricingError>(())
//! ```

// ================================================================================================
// MODULES
// ================================================================================================

pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod pricing;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{PricerResult, PricingError};

pub use models::bs::price;
pub use models::dividends::{
    CashDividend, ContinuousDividendYield, DiscreteDividendSet, DividendData, DividendMode,
};

pub use pricing::{
    config::{DisplayConfig, PricerConfig},
    types::{PricingRequest, PricingResult},
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Configuration presets for the command-line pricer.
///
/// - [`interactive()`]: prices printed to 4 decimals, warnings logged
/// - [`quiet()`]: nothing printed, errors only
pub mod default_configs {
    use crate::pricing::config::PricerConfig;

    /// Prints every valuation; suited to manual use.
    ///
    /// ```rust
    /// use bs_valuation::default_configs;
    ///
    /// let config = default_configs::interactive();
    /// assert!(config.display.enabled);
    /// assert_eq!(config.display.decimals, 4);
    /// ```
    pub fn interactive() -> PricerConfig {
        PricerConfig::interactive()
    }

    /// Silent configuration for scripted use.
    pub fn quiet() -> PricerConfig {
        PricerConfig::quiet()
    }
}

// ================================================================================================
// PRICING API
// ================================================================================================

/// Price a single [`PricingRequest`].
///
/// When `request.display` is set the prices are also printed to stdout with 4 decimals.
/// Display never alters the returned values.
///
/// # Errors
///
/// [`PricingError::InvalidInput`] for non-positive spot, strike, maturity or volatility, a
/// dividend payload that does not match the mode, or dividends that exceed the spot.
///
/// # Example
///
/// ```rust
/// use bs_valuation::{price_request, PricingRequest};
///
/// let req = PricingRequest::new(100.0, 90.0, 0.75, 0.08, 0.25).with_dividend_yield(0.04);
/// let res = price_request(&req)?;
/// assert!(res.parity_gap().abs() < 1e-9);
/// # Ok::<(), bs_valuation::PricingError>(())
/// ```
pub fn price_request(request: &PricingRequest) -> PricerResult<PricingResult> {
    let result = price(
        request.spot,
        request.strike,
        request.years_to_exp,
        request.rate,
        request.volatility,
        request.dividend_mode,
        request.dividends.as_ref(),
    )
    .map_err(|e| {
        tracing::warn!(
            spot = request.spot,
            strike = request.strike,
            mode = %request.dividend_mode,
            error = %e,
            "pricing request rejected"
        );
        e
    })?;

    if request.display {
        display::emit(&result);
    }

    Ok(result)
}

/// Price several requests independently.
///
/// Results come back in input order; one failing request does not affect the others.
pub fn price_batch(requests: &[PricingRequest]) -> Vec<PricerResult<PricingResult>> {
    let results: Vec<_> = requests.iter().map(price_request).collect();
    tracing::debug!(
        total = results.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "priced batch"
    );
    results
}

/// Price every request in `config` and write a report to `out`.
///
/// Per-request display flags are ignored here: `config.display` alone decides whether
/// prices are written, so each request appears in the output at most once.
pub fn report_batch<W: std::io::Write>(
    config: &PricerConfig,
    out: &mut W,
) -> std::io::Result<Vec<PricerResult<PricingResult>>> {
    let requests: Vec<PricingRequest> = config
        .requests
        .iter()
        .map(|r| r.clone().with_display(false))
        .collect();
    let results = price_batch(&requests);

    if config.display.enabled {
        display::write_batch_report(out, &requests, &results, config.display.decimals)?;
    }
    Ok(results)
}

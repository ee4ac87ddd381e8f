//! Human-readable rendering of a [`PricingResult`].
//!
//! Formatting is a separate step from pricing: nothing here feeds back into the numbers.

use crate::error::PricerResult;
use crate::pricing::types::{PricingRequest, PricingResult};
use std::io::{self, Write};

/// Decimal places used when a request asks for display
pub const DEFAULT_DECIMALS: usize = 4;

/// Two-line summary of the call and put fair values.
pub fn format_prices(result: &PricingResult, decimals: usize) -> String {
    format!(
        "The fair price of the call option is ${:.prec$}.\nThe fair price of the put option is ${:.prec$}",
        result.call,
        result.put,
        prec = decimals
    )
}

/// Writes [`format_prices`] followed by a newline to `out`.
pub fn write_prices<W: Write>(out: &mut W, result: &PricingResult, decimals: usize) -> io::Result<()> {
    writeln!(out, "{}", format_prices(result, decimals))
}

/// Header line naming a request inside a batch report.
pub fn format_request_header(index: usize, request: &PricingRequest) -> String {
    format!(
        "*** Request {} (S={}, K={}, T={}, dividends={}) ***",
        index + 1,
        request.spot,
        request.strike,
        request.years_to_exp,
        request.dividend_mode
    )
}

/// Writes a header and the prices for every successfully priced request.
/// Failed requests are skipped; reporting them is up to the caller.
pub fn write_batch_report<W: Write>(
    out: &mut W,
    requests: &[PricingRequest],
    results: &[PricerResult<PricingResult>],
    decimals: usize,
) -> io::Result<()> {
    for (i, (request, result)) in requests.iter().zip(results).enumerate() {
        if let Ok(res) = result {
            writeln!(out, "{}", format_request_header(i, request))?;
            write_prices(out, res, decimals)?;
        }
    }
    Ok(())
}

/// Prints to stdout, logging instead of failing if stdout is gone.
pub(crate) fn emit(result: &PricingResult) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = write_prices(&mut handle, result, DEFAULT_DECIMALS) {
        tracing::warn!(error = %e, "failed to display option prices");
    }
}

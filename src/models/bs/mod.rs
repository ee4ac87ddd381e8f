// Black-Scholes valuation of European calls and puts.
//
// The call is priced from the closed form and the put is derived from put-call parity,
// so `c - p = s_eff - x * exp(-r t)` holds by construction. Discrete dividends follow the
// escrowed-dividend model: their present value comes off spot and nothing else changes.

use crate::error::{PricerResult, PricingError};
use crate::models::dividends::{self, DividendAdjustment, DividendData, DividendMode};
use crate::models::utils::{discount_factor, ensure_finite, ensure_positive, norm_cdf};
use crate::pricing::types::PricingResult;

/// Black-Scholes call/put pair for a European option.
///
/// * `s` - spot price, `x` - strike, `t` - years to maturity
/// * `r` - continuously compounded risk-free rate (may be negative)
/// * `v` - annualised volatility
/// * `mode`, `data` - dividend treatment and its payload
///
/// Returns [`PricingError::InvalidInput`] when a price input is not strictly positive,
/// `v * sqrt(t)` is zero, the dividend payload does not match `mode`, or the dividends
/// consume the whole spot.
pub fn price(
    s: f64,
    x: f64,
    t: f64,
    r: f64,
    v: f64,
    mode: DividendMode,
    data: Option<&DividendData>,
) -> PricerResult<PricingResult> {
    ensure_positive("spot price", s)?;
    ensure_positive("strike price", x)?;
    ensure_positive("time to maturity", t)?;
    ensure_positive("volatility", v)?;
    ensure_finite("risk-free rate", r)?;

    match dividends::resolve(mode, data, t, r)? {
        DividendAdjustment::SpotReduction(pv) => price_escrowed(s, x, t, r, v, pv),
        DividendAdjustment::Yield(q) => price_with_yield(s, x, t, r, v, q),
    }
}

/// Prices with spot reduced by `pv_dividends`, the present value of cash dividends.
pub fn price_escrowed(
    s: f64,
    x: f64,
    t: f64,
    r: f64,
    v: f64,
    pv_dividends: f64,
) -> PricerResult<PricingResult> {
    let s_adj = s - pv_dividends;
    if s_adj <= 0.0 || !s_adj.is_finite() {
        return Err(PricingError::invalid(format!(
            "present value of dividends ({}) leaves no positive spot (spot {})",
            pv_dividends, s
        )));
    }

    let (d1, d2) = d1_d2((s_adj / x).ln(), r, v, t)?;
    let df = discount_factor(r, t);
    let pv_strike = x * df;

    let c = (s_adj * norm_cdf(d1) - pv_strike * norm_cdf(d2)).max(0.0);
    let p = (c - s_adj + pv_strike).max(0.0);

    tracing::debug!(
        branch = "escrowed",
        pv_dividends,
        s_adj,
        d1,
        d2,
        call = c,
        put = p,
        "black-scholes"
    );
    finish(c, p, s_adj, pv_strike)
}

/// Prices with a continuous dividend yield `q`.
pub fn price_with_yield(
    s: f64,
    x: f64,
    t: f64,
    r: f64,
    v: f64,
    q: f64,
) -> PricerResult<PricingResult> {
    let (d1, d2) = d1_d2((s / x).ln(), r - q, v, t)?;
    let s_eff = s * discount_factor(q, t);
    let pv_strike = x * discount_factor(r, t);

    let c = (s_eff * norm_cdf(d1) - pv_strike * norm_cdf(d2)).max(0.0);
    let p = (c - s_eff + pv_strike).max(0.0);

    tracing::debug!(
        branch = "continuous",
        q,
        s_eff,
        d1,
        d2,
        call = c,
        put = p,
        "black-scholes"
    );
    finish(c, p, s_eff, pv_strike)
}

/// d1 = (ln(S/K) + (drift + v^2/2) t) / (v sqrt(t)), d2 = d1 - v sqrt(t)
fn d1_d2(ln_moneyness: f64, drift: f64, v: f64, t: f64) -> PricerResult<(f64, f64)> {
    let vol_sqrt_t = v * t.sqrt();
    if vol_sqrt_t == 0.0 || !vol_sqrt_t.is_finite() {
        return Err(PricingError::invalid(format!(
            "v * sqrt(t) = {} (v={}, t={}) cannot be used as a denominator",
            vol_sqrt_t, v, t
        )));
    }
    let d1 = (ln_moneyness + (drift + 0.5 * v * v) * t) / vol_sqrt_t;
    Ok((d1, d1 - vol_sqrt_t))
}

fn finish(
    c: f64,
    p: f64,
    effective_spot: f64,
    discounted_strike: f64,
) -> PricerResult<PricingResult> {
    if !c.is_finite() || !p.is_finite() {
        return Err(PricingError::invalid(format!(
            "inputs produce a non-finite price (call={}, put={})",
            c, p
        )));
    }
    Ok(PricingResult {
        call: c,
        put: p,
        effective_spot,
        discounted_strike,
    })
}

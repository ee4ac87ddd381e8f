#![allow(dead_code)] // Not every test binary uses every helper

use bs_valuation::{DiscreteDividendSet, PricingRequest, PricingResult};

/// Tolerance for identities that hold exactly in real arithmetic
pub const TOL: f64 = 1e-9;

/// Tolerance against [`reference_prices`]; the statrs CDF is only good to a few 1e-10
pub const REF_TOL: f64 = 1e-8;

/// Tolerance against values worked out at 40 significant digits
pub const EXACT_TOL: f64 = 1e-12;

/// $100 share price, $90 strike, 9 month maturity, 8% rate, 25% volatility
pub fn base_request() -> PricingRequest {
    PricingRequest::new(100.0, 90.0, 0.75, 0.08, 0.25)
}

/// $1 paid at month 1 and $1.50 at month 7
pub fn sample_dividends() -> DiscreteDividendSet {
    DiscreteDividendSet::new()
        .with(1.0, 1.0 / 12.0)
        .with(1.5, 7.0 / 12.0)
}

/// Reference N(x) from statrs, independent of the crate's erf-based version
pub fn reference_cdf(x: f64) -> f64 {
    use statrs::distribution::{ContinuousCDF, Normal};
    Normal::new(0.0, 1.0).unwrap().cdf(x)
}

/// Black-Scholes call/put written out from the textbook formulas, using the statrs
/// normal CDF, for cross-checking the library. `s_eff` is the dividend-adjusted spot
/// and `drift_q` the continuous yield (0 for the escrowed model).
pub fn reference_prices(s: f64, s_eff: f64, x: f64, t: f64, r: f64, v: f64, drift_q: f64) -> (f64, f64) {
    let ln_m = if drift_q == 0.0 { (s_eff / x).ln() } else { (s / x).ln() };
    let d1 = (ln_m + (r - drift_q + 0.5 * v * v) * t) / (v * t.sqrt());
    let d2 = d1 - v * t.sqrt();
    let pv_k = x * (-r * t).exp();
    let c = (s_eff * reference_cdf(d1) - pv_k * reference_cdf(d2)).max(0.0);
    let p = (c - s_eff + pv_k).max(0.0);
    (c, p)
}

pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{}: expected {}, got {} (diff {:e})",
        what,
        expected,
        actual,
        (actual - expected).abs()
    );
}

pub fn assert_same_prices(a: &PricingResult, b: &PricingResult, what: &str) {
    assert_close(a.call, b.call, TOL, &format!("{} call", what));
    assert_close(a.put, b.put, TOL, &format!("{} put", what));
}

use crate::models::dividends::{
    ContinuousDividendYield, DiscreteDividendSet, DividendData, DividendMode,
};

/// Market and contract inputs for a single European option valuation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to maturity in years
    pub years_to_exp: f64,
    /// Risk-free rate (continuously compounded, may be negative)
    pub rate: f64,
    /// Annualised volatility (as decimal, e.g., 0.25 for 25%)
    pub volatility: f64,
    /// Dividend treatment
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_mode: DividendMode,
    /// Schedule or yield matching `dividend_mode`
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividends: Option<DividendData>,
    /// Print both prices to stdout after pricing
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: bool,
}

impl PricingRequest {
    /// Dividend-free request with display switched off.
    pub fn new(spot: f64, strike: f64, years_to_exp: f64, rate: f64, volatility: f64) -> Self {
        Self {
            spot,
            strike,
            years_to_exp,
            rate,
            volatility,
            dividend_mode: DividendMode::None,
            dividends: None,
            display: false,
        }
    }

    pub fn with_discrete_dividends(mut self, set: DiscreteDividendSet) -> Self {
        self.dividend_mode = DividendMode::Discrete;
        self.dividends = Some(DividendData::Schedule(set));
        self
    }

    pub fn with_dividend_yield(mut self, q: f64) -> Self {
        self.dividend_mode = DividendMode::Continuous;
        self.dividends = Some(DividendData::Yield(ContinuousDividendYield(q)));
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }
}

/// Call and put fair values for one request
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Call price, never negative
    pub call: f64,
    /// Put price, never negative
    pub put: f64,
    /// Spot after dividend adjustment: `s - PV(dividends)` or `s * exp(-q t)`
    pub effective_spot: f64,
    /// Strike discounted at the risk-free rate: `x * exp(-r t)`
    pub discounted_strike: f64,
}

impl PricingResult {
    /// `(call, put)` pair
    pub fn prices(&self) -> (f64, f64) {
        (self.call, self.put)
    }

    /// Copy with both prices rounded half away from zero to `decimals` places.
    ///
    /// A price is returned unchanged when scaling it by `10^decimals` leaves the finite
    /// range, since it already carries every digit `f64` can hold.
    pub fn rounded(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
        let round = |price: f64| {
            let scaled = price * scale;
            if scaled.is_finite() {
                scaled.round() / scale
            } else {
                price
            }
        };
        Self {
            call: round(self.call),
            put: round(self.put),
            ..*self
        }
    }

    /// `c - p - (s_eff - x e^{-rt})`, zero up to rounding for any priced request
    pub fn parity_gap(&self) -> f64 {
        (self.call - self.put) - (self.effective_spot - self.discounted_strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_keeps_adjusted_spot() {
        let res = PricingResult {
            call: 17.785_383_766,
            put: 2.544_191_789,
            effective_spot: 100.0,
            discounted_strike: 84.759_0,
        };
        let r = res.rounded(4);
        assert_eq!(r.prices(), (17.7854, 2.5442));
        assert_eq!(r.effective_spot, 100.0);
    }

    #[test]
    fn test_rounded_with_huge_precision_is_identity() {
        let res = PricingResult {
            call: 17.785_383_766_577_894,
            put: 2.544_191_789_160_28,
            effective_spot: 100.0,
            discounted_strike: 84.759_0,
        };
        for decimals in [400, i32::MAX as u32, i32::MAX as u32 + 1, u32::MAX] {
            assert_eq!(res.rounded(decimals), res, "decimals = {}", decimals);
        }
    }

    #[test]
    fn test_builders_set_mode() {
        let req = PricingRequest::new(100.0, 90.0, 0.75, 0.08, 0.25).with_dividend_yield(0.04);
        assert_eq!(req.dividend_mode, DividendMode::Continuous);
        assert!(!req.display);
    }
}

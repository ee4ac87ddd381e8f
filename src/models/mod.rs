pub mod bs;
pub mod dividends;

/// Utility functions shared by the pricer and the dividend model
pub mod utils {
    use crate::error::{PricerResult, PricingError};

    /// Standard normal cumulative distribution function: 0.5 * [1 + erf(x / sqrt(2))]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
    }

    /// Continuously compounded discount factor exp(-r * t)
    #[inline]
    pub fn discount_factor(r: f64, t: f64) -> f64 {
        (-r * t).exp()
    }

    /// Rejects a value that is not strictly positive and finite.
    pub fn ensure_positive(name: &str, value: f64) -> PricerResult<()> {
        if value <= 0.0 || !value.is_finite() {
            return Err(PricingError::invalid(format!(
                "{} ({}) must be > 0 and finite",
                name, value
            )));
        }
        Ok(())
    }

    /// Rejects NaN and infinities.
    pub fn ensure_finite(name: &str, value: f64) -> PricerResult<()> {
        if !value.is_finite() {
            return Err(PricingError::invalid(format!(
                "{} ({}) must be finite",
                name, value
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_norm_cdf_reference_points() {
            assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
            assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-12);
            assert!((norm_cdf(-1.96) - 0.024_997_895_148_220_4).abs() < 1e-12);
            assert!((norm_cdf(1.0) + norm_cdf(-1.0) - 1.0).abs() < 1e-15);
        }

        #[test]
        fn test_ensure_positive() {
            assert!(ensure_positive("spot", 1.0).is_ok());
            assert!(ensure_positive("spot", 0.0).is_err());
            assert!(ensure_positive("spot", -2.0).is_err());
            assert!(ensure_positive("spot", f64::NAN).is_err());
            assert!(ensure_positive("spot", f64::INFINITY).is_err());
        }
    }
}

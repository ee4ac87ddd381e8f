// src/models/dividends.rs

//! Dividend treatment for the Black-Scholes pricer.
//!
//! Two treatments are supported on top of the dividend-free case:
//!
//! - **Discrete**: cash amounts paid at known times. Their present value is removed from
//!   spot before pricing (escrowed-dividend model).
//! - **Continuous**: an annualised yield `q` that discounts spot by `exp(-q t)`.

use crate::error::{PricerResult, PricingError};
use crate::models::utils::discount_factor;
use std::fmt;
use std::str::FromStr;

/// How dividends are treated for a request.
///
/// The set is closed. Text coming from the command line or a config file is parsed
/// through [`FromStr`], which rejects anything outside the three modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum DividendMode {
    #[default]
    None,
    Discrete,
    Continuous,
}

impl FromStr for DividendMode {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(DividendMode::None),
            "d" | "discrete" => Ok(DividendMode::Discrete),
            "c" | "continuous" => Ok(DividendMode::Continuous),
            other => Err(PricingError::invalid(format!(
                "unrecognised dividend mode '{}' (expected none, discrete or continuous)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for DividendMode {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DividendMode> for String {
    fn from(mode: DividendMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for DividendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DividendMode::None => "none",
            DividendMode::Discrete => "discrete",
            DividendMode::Continuous => "continuous",
        };
        f.write_str(name)
    }
}

/// A single cash dividend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(f64, f64)", into = "(f64, f64)"))]
pub struct CashDividend {
    /// Amount paid, in currency units
    pub amount: f64,
    /// Payment time in years from today
    pub time: f64,
}

impl From<(f64, f64)> for CashDividend {
    fn from((amount, time): (f64, f64)) -> Self {
        Self { amount, time }
    }
}

impl From<CashDividend> for (f64, f64) {
    fn from(div: CashDividend) -> Self {
        (div.amount, div.time)
    }
}

/// Schedule of discrete cash dividends.
///
/// Entries are kept in insertion order. Two payments of the same amount are two
/// entries, never merged.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DiscreteDividendSet {
    entries: Vec<CashDividend>,
}

impl DiscreteDividendSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a payment of `amount` at `time` years.
    pub fn push(&mut self, amount: f64, time: f64) {
        self.entries.push(CashDividend { amount, time });
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, amount: f64, time: f64) -> Self {
        self.push(amount, time);
        self
    }

    pub fn entries(&self) -> &[CashDividend] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks every entry against an option with `maturity` years to run.
    pub fn validate(&self, maturity: f64) -> PricerResult<()> {
        for (i, div) in self.entries.iter().enumerate() {
            if !div.amount.is_finite() || div.amount < 0.0 {
                return Err(PricingError::invalid(format!(
                    "dividend #{} amount ({}) must be >= 0 and finite",
                    i, div.amount
                )));
            }
            if !div.time.is_finite() || div.time <= 0.0 {
                return Err(PricingError::invalid(format!(
                    "dividend #{} time ({}) must be > 0 and finite",
                    i, div.time
                )));
            }
            if div.time > maturity {
                return Err(PricingError::invalid(format!(
                    "dividend #{} time ({}) falls after maturity ({})",
                    i, div.time, maturity
                )));
            }
        }
        Ok(())
    }

    /// Present value of all payments discounted at the risk-free rate `r`:
    /// `Σ amount_i · exp(-r · time_i)`.
    pub fn present_value(&self, r: f64) -> f64 {
        self.entries
            .iter()
            .map(|div| div.amount * discount_factor(r, div.time))
            .sum()
    }
}

impl FromIterator<(f64, f64)> for DiscreteDividendSet {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(CashDividend::from).collect(),
        }
    }
}

/// Annualised continuous dividend yield, e.g. `0.04` for 4%.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ContinuousDividendYield(pub f64);

impl ContinuousDividendYield {
    pub fn rate(&self) -> f64 {
        self.0
    }
}

/// Dividend payload supplied with a request.
///
/// In TOML a schedule is an array of `[amount, time]` pairs and a yield is a bare number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DividendData {
    Yield(ContinuousDividendYield),
    Schedule(DiscreteDividendSet),
}

impl From<DiscreteDividendSet> for DividendData {
    fn from(set: DiscreteDividendSet) -> Self {
        DividendData::Schedule(set)
    }
}

impl From<ContinuousDividendYield> for DividendData {
    fn from(q: ContinuousDividendYield) -> Self {
        DividendData::Yield(q)
    }
}

/// Dividend treatment after the mode and payload have been reconciled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DividendAdjustment {
    /// Present value of discrete dividends to subtract from spot (0 when none).
    SpotReduction(f64),
    /// Continuous yield `q`.
    Yield(f64),
}

/// Reconciles `mode` with `data` for an option with `maturity` years and rate `r`.
pub(crate) fn resolve(
    mode: DividendMode,
    data: Option<&DividendData>,
    maturity: f64,
    r: f64,
) -> PricerResult<DividendAdjustment> {
    match (mode, data) {
        (DividendMode::None, _) => Ok(DividendAdjustment::SpotReduction(0.0)),
        (DividendMode::Discrete, None) => Ok(DividendAdjustment::SpotReduction(0.0)),
        (DividendMode::Discrete, Some(DividendData::Schedule(set))) => {
            set.validate(maturity)?;
            Ok(DividendAdjustment::SpotReduction(set.present_value(r)))
        }
        (DividendMode::Discrete, Some(DividendData::Yield(q))) => Err(PricingError::invalid(
            format!(
                "discrete dividend mode expects a schedule of (amount, time) pairs, got a yield of {}",
                q.rate()
            ),
        )),
        (DividendMode::Continuous, Some(DividendData::Yield(q))) => {
            if !q.rate().is_finite() {
                return Err(PricingError::invalid(format!(
                    "continuous dividend yield ({}) must be finite",
                    q.rate()
                )));
            }
            Ok(DividendAdjustment::Yield(q.rate()))
        }
        (DividendMode::Continuous, Some(DividendData::Schedule(_))) => Err(PricingError::invalid(
            "continuous dividend mode expects a single yield, got a dividend schedule",
        )),
        (DividendMode::Continuous, None) => Err(PricingError::invalid(
            "continuous dividend mode requires a dividend yield",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("".parse::<DividendMode>().unwrap(), DividendMode::None);
        assert_eq!("D".parse::<DividendMode>().unwrap(), DividendMode::Discrete);
        assert_eq!(
            "Continuous".parse::<DividendMode>().unwrap(),
            DividendMode::Continuous
        );
        let err = "X".parse::<DividendMode>().unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_repeated_amounts_are_kept() {
        let set = DiscreteDividendSet::new().with(1.0, 0.25).with(1.0, 0.5);
        assert_eq!(set.len(), 2);
        let expected = (-0.05_f64 * 0.25).exp() + (-0.05_f64 * 0.5).exp();
        assert!((set.present_value(0.05) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_present_value_of_empty_set_is_zero() {
        assert_eq!(DiscreteDividendSet::new().present_value(0.08), 0.0);
    }

    #[test]
    fn test_dividend_after_maturity_rejected() {
        let set = DiscreteDividendSet::new().with(1.0, 1.5);
        assert!(set.validate(1.0).is_err());
        assert!(set.validate(1.5).is_ok());
    }

    #[test]
    fn test_resolve_shape_mismatch() {
        let schedule = DividendData::from(DiscreteDividendSet::new().with(1.0, 0.1));
        let q = DividendData::from(ContinuousDividendYield(0.04));

        assert!(resolve(DividendMode::Continuous, Some(&schedule), 1.0, 0.05).is_err());
        assert!(resolve(DividendMode::Discrete, Some(&q), 1.0, 0.05).is_err());
        assert!(resolve(DividendMode::Continuous, None, 1.0, 0.05).is_err());
        assert_eq!(
            resolve(DividendMode::None, Some(&q), 1.0, 0.05).unwrap(),
            DividendAdjustment::SpotReduction(0.0)
        );
        assert_eq!(
            resolve(DividendMode::Continuous, Some(&q), 1.0, 0.05).unwrap(),
            DividendAdjustment::Yield(0.04)
        );
    }
}

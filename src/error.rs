/// Errors raised while validating or pricing a request.
///
/// Every failure is detected before or during the single pricing pass and handed
/// straight back to the caller. There is no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PricingError::InvalidInput(msg.into())
    }
}

pub type PricerResult<T> = Result<T, PricingError>;

pub mod csfloat;
pub mod steam;

use thiserror::Error;

use self::steam::Baseline;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("{0}")]
    Validation(String),

    #[error("float out of range: {0}")]
    FloatOutOfRange(f64),

    #[error("baseline request failed: {0}")]
    Upstream(String),

    #[error("no price data found")]
    NoData,

    #[error("configuration error: {0}")]
    Config(String),
}

/// A general marketplace that knows the coarse price of an exact hash name.
///
/// Failures here abort the whole resolution.
pub trait BaselineSource {
    fn fetch_baseline(
        &self,
        hash_name: &str,
    ) -> impl std::future::Future<Output = Result<Baseline, PricingError>> + Send;
}

/// A float-aware marketplace used as an optional refinement.
///
/// Any failure is reported as `None`, never as an error.
pub trait FloatPremiumSource {
    fn fetch_float_premium(
        &self,
        hash_name: &str,
        float: f64,
        paint_seed: Option<u32>,
    ) -> impl std::future::Future<Output = Option<f64>> + Send;
}

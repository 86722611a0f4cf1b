use std::net::SocketAddr;

use crate::sources::{csfloat, steam, PricingError};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Enables float-precise pricing when set
    pub csfloat_api_key: Option<String>,
    pub steam_url: String,
    pub csfloat_url: String,
}

impl Config {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, PricingError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, PricingError> {
        // blank values count as unset
        let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let addr = var("PRICER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let bind_addr: SocketAddr = addr
            .parse()
            .map_err(|e| PricingError::Config(format!("invalid PRICER_ADDR {:?}: {}", addr, e)))?;

        Ok(Self {
            bind_addr,
            csfloat_api_key: var("CSFLOAT_API_KEY"),
            steam_url: var("STEAM_MARKET_URL").unwrap_or_else(|| steam::BASE_URL.to_owned()),
            csfloat_url: var("CSFLOAT_URL").unwrap_or_else(|| csfloat::BASE_URL.to_owned()),
        })
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PRICE_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d.]").unwrap());

/// Query string of the `priceoverview` endpoint
#[derive(Debug, Serialize)]
pub struct PriceOverviewQuery<'a> {
    pub appid: u32,
    pub currency: u32,
    pub market_hash_name: &'a str,
}

/// Raw response of the `priceoverview` endpoint.
/// Prices come back as display strings such as `"$1,234.56"`.
#[derive(Debug, Deserialize, Clone)]
pub struct PriceOverview {
    pub success: Option<bool>,
    pub lowest_price: Option<String>,
    pub median_price: Option<String>,
    pub volume: Option<String>,
}

impl PriceOverview {
    pub fn baseline(&self) -> Baseline {
        Baseline {
            median: self.median_price.as_deref().and_then(parse_price),
            lowest: self.lowest_price.as_deref().and_then(parse_price),
        }
    }
}

/// Coarse market statistics for one hash name, in major currency units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Baseline {
    pub median: Option<f64>,
    pub lowest: Option<f64>,
}

/// Strips everything except digits and the decimal point, then parses.
pub fn parse_price(raw: &str) -> Option<f64> {
    PRICE_NOISE.replace_all(raw, "").parse().ok()
}

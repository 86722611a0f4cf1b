use futures_util::future;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_option_number_from_string;
use serde_with::skip_serializing_none;

use crate::{
    sources::{BaselineSource, FloatPremiumSource, PricingError},
    wear::{hash_name, Wear},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub item: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub float: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub paint_seed: Option<u32>,
    /// Overrides the wear classified from `float` when set
    pub wear: Option<Wear>,
}

/// Breakdown of one resolution. `expected_price` is the first available
/// of `float_adjusted`, `steam_median` and `steam_lowest`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub expected_price: f64,
    pub steam_median: Option<f64>,
    pub steam_lowest: Option<f64>,
    pub float_adjusted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WearPrice {
    pub wear: Wear,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WearSpread {
    pub all_wears: Vec<WearPrice>,
    pub average_price: f64,
}

pub struct PriceResolver<B, F> {
    baseline: B,
    premium: F,
}

impl<B, F> PriceResolver<B, F>
where
    B: BaselineSource + Sync,
    F: FloatPremiumSource + Sync,
{
    pub fn new(baseline: B, premium: F) -> Self {
        Self { baseline, premium }
    }

    pub async fn resolve(&self, request: &PriceRequest) -> Result<f64, PricingError> {
        Ok(self.quote(request).await?.expected_price)
    }

    pub async fn quote(&self, request: &PriceRequest) -> Result<PriceQuote, PricingError> {
        let item = required_item(request.item.as_deref())?;

        let classified = Wear::classify(request.float)?;
        let wear = request.wear.unwrap_or(classified);
        let hash_name = hash_name(item, wear);

        let premium = async {
            match request.float {
                Some(float) => {
                    self.premium
                        .fetch_float_premium(&hash_name, float, request.paint_seed)
                        .await
                }
                None => None,
            }
        };

        let (baseline, float_adjusted) =
            future::join(self.baseline.fetch_baseline(&hash_name), premium).await;
        let baseline = baseline?;

        let expected_price = float_adjusted
            .or(baseline.median)
            .or(baseline.lowest)
            .ok_or(PricingError::NoData)?;

        info!("Resolved {} to {}", hash_name, expected_price);

        Ok(PriceQuote {
            expected_price,
            steam_median: baseline.median,
            steam_lowest: baseline.lowest,
            float_adjusted,
        })
    }

    /// Prices the item in every wear and averages the wears that have data.
    pub async fn resolve_all_wears(&self, item: &str) -> Result<WearSpread, PricingError> {
        let item = required_item(Some(item))?;

        let mut all_wears = Vec::with_capacity(Wear::ALL.len());
        for wear in Wear::ALL {
            let request = PriceRequest {
                item: Some(item.to_owned()),
                wear: Some(wear),
                ..Default::default()
            };

            match self.resolve(&request).await {
                Ok(price) => all_wears.push(WearPrice { wear, price }),
                Err(e) => debug!("Skipping {} ({}): {}", item, wear, e),
            }
        }

        if all_wears.is_empty() {
            return Err(PricingError::NoData);
        }

        let average_price =
            all_wears.iter().map(|w| w.price).sum::<f64>() / all_wears.len() as f64;

        Ok(WearSpread {
            all_wears,
            average_price,
        })
    }
}

fn required_item(item: Option<&str>) -> Result<&str, PricingError> {
    match item.map(str::trim) {
        Some(item) if !item.is_empty() => Ok(item),
        _ => Err(PricingError::Validation("missing item".to_owned())),
    }
}

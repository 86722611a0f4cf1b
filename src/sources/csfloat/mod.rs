use log::{debug, warn};
use reqwest::{header::AUTHORIZATION, Client};

use self::types::{FloatBand, ListingQuery, ListingResponse};
use super::{FloatPremiumSource, PricingError};

pub mod types;

pub const BASE_URL: &str = "https://csfloat.com";

#[derive(Clone)]
pub struct CsFloat {
    req_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CsFloat {
    /// Without an API key every lookup is skipped.
    pub fn new(api_key: Option<String>, base_url: String) -> Result<Self, PricingError> {
        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|e| PricingError::Config(format!("failed to build CSFloat client: {}", e)))?;

        Ok(Self {
            req_client: client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Requests the cheapest listings matching the query.
    /// Returns `None` on any transport or decoding failure.
    pub async fn get_listings(&self, api_key: &str, query: &ListingQuery<'_>) -> Option<ListingResponse> {
        let req = match self
            .req_client
            .get(format!("{}/api/v1/listings", self.base_url))
            .header(AUTHORIZATION, api_key)
            .query(query)
            .send()
            .await
        {
            Ok(req) => req,
            Err(e) => {
                warn!("Failed to send request to CSFloat: {:?}", e);
                return None;
            }
        };

        if !req.status().is_success() {
            warn!(
                "CSFloat listings for {} failed: {:?}",
                query.market_hash_name,
                req.status()
            );
            return None;
        }

        match req.json().await {
            Ok(res) => Some(res),
            Err(e) => {
                warn!("Failed to parse JSON from CSFloat: {:?}", e);
                None
            }
        }
    }
}

impl FloatPremiumSource for CsFloat {
    async fn fetch_float_premium(
        &self,
        hash_name: &str,
        float: f64,
        paint_seed: Option<u32>,
    ) -> Option<f64> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No CSFloat API key, skipping float premium for {}", hash_name);
            return None;
        };

        let query = ListingQuery::new(hash_name, FloatBand::around(float), paint_seed);
        let listings = self.get_listings(api_key, &query).await?;
        let average = listings.get_average();

        debug!(
            "CSFloat premium for {} in [{}, {}]: {:?} over {} listings",
            hash_name,
            query.min_float,
            query.max_float,
            average,
            listings.listings().len()
        );

        average
    }
}

use log::{debug, error};
use reqwest::Client;

use self::types::{PriceOverview, PriceOverviewQuery};
use super::{BaselineSource, PricingError};

pub use self::types::Baseline;

pub mod types;

pub const BASE_URL: &str = "https://steamcommunity.com";

/// Counter-Strike's app id on the Steam market
const APP_ID: u32 = 730;
/// USD
const CURRENCY: u32 = 1;

#[derive(Clone)]
pub struct SteamMarket {
    req_client: Client,
    base_url: String,
}

impl SteamMarket {
    pub fn new(base_url: String) -> Result<Self, PricingError> {
        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|e| PricingError::Config(format!("failed to build Steam client: {}", e)))?;

        Ok(Self {
            req_client: client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Requests the price overview of the given hash name from the Steam market.
    pub async fn get_price_overview(&self, hash_name: &str) -> Result<PriceOverview, PricingError> {
        let req = match self
            .req_client
            .get(format!("{}/market/priceoverview/", self.base_url))
            .query(&PriceOverviewQuery {
                appid: APP_ID,
                currency: CURRENCY,
                market_hash_name: hash_name,
            })
            .send()
            .await
        {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to send request to Steam: {:?}", e);
                return Err(PricingError::Upstream(e.to_string()));
            }
        };

        if !req.status().is_success() {
            error!(
                "Failed to get price overview from Steam for {}: {:?}",
                hash_name,
                req.status()
            );
            return Err(PricingError::Upstream(format!("status {}", req.status())));
        }

        let overview: PriceOverview = match req.json().await {
            Ok(res) => res,
            Err(e) => {
                error!("Failed to parse JSON from Steam: {:?}", e);
                return Err(PricingError::Upstream(e.to_string()));
            }
        };

        if overview.success == Some(false) {
            error!("Steam reported success=false for {}", hash_name);
            return Err(PricingError::Upstream(format!(
                "unsuccessful price overview for {}",
                hash_name
            )));
        }

        Ok(overview)
    }
}

impl BaselineSource for SteamMarket {
    async fn fetch_baseline(&self, hash_name: &str) -> Result<Baseline, PricingError> {
        let overview = self.get_price_overview(hash_name).await?;
        let baseline = overview.baseline();
        debug!(
            "Steam baseline for {}: {:?} (volume {:?})",
            hash_name, baseline, overview.volume
        );

        Ok(baseline)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use serde_json::{json, Value};
    use warp::{http::StatusCode, Filter};

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Serves a fixed price overview on an ephemeral local port and records
    /// the query strings it receives.
    fn stub_market(status: StatusCode, body: Value) -> (SteamMarket, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();

        let route = warp::path("market")
            .and(warp::path("priceoverview"))
            .and(warp::query::<HashMap<String, String>>())
            .map(move |query: HashMap<String, String>| {
                recorder.lock().unwrap().push(query);
                warp::reply::with_status(warp::reply::json(&body), status)
            });

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let steam = SteamMarket::new(format!("http://{}", addr)).unwrap();
        (steam, seen)
    }

    #[tokio::test]
    async fn reads_baseline_from_market() {
        let (steam, seen) = stub_market(
            StatusCode::OK,
            json!({ "success": true, "lowest_price": "$11.90", "median_price": "$12.34 USD" }),
        );

        let baseline = steam
            .fetch_baseline("AK-47 | Redline (Field-Tested)")
            .await
            .unwrap();

        assert_eq!(
            baseline,
            Baseline {
                median: Some(12.34),
                lowest: Some(11.9)
            }
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["appid"], "730");
        assert_eq!(seen[0]["currency"], "1");
        assert_eq!(seen[0]["market_hash_name"], "AK-47 | Redline (Field-Tested)");
    }

    #[tokio::test]
    async fn unsuccessful_overview_is_upstream_error() {
        let (steam, _) = stub_market(StatusCode::OK, json!({ "success": false }));

        let res = steam.fetch_baseline("AK-47 | Redline (Factory New)").await;
        assert!(matches!(res, Err(PricingError::Upstream(_))));
    }

    #[tokio::test]
    async fn missing_prices_are_not_an_error() {
        let (steam, _) = stub_market(StatusCode::OK, json!({ "success": true }));

        let baseline = steam
            .fetch_baseline("AK-47 | Redline (Factory New)")
            .await
            .unwrap();
        assert_eq!(baseline, Baseline::default());
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let (steam, seen) = stub_market(StatusCode::TOO_MANY_REQUESTS, json!(null));

        let res = steam.fetch_baseline("AK-47 | Redline (Field-Tested)").await;
        assert!(matches!(res, Err(PricingError::Upstream(_))));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_body_is_upstream_error() {
        let (steam, _) = stub_market(StatusCode::OK, json!("overview"));

        let res = steam.fetch_baseline("AK-47 | Redline (Field-Tested)").await;
        assert!(matches!(res, Err(PricingError::Upstream(_))));
    }

    #[test]
    fn query_carries_fixed_catalog_and_currency() {
        let query = PriceOverviewQuery {
            appid: APP_ID,
            currency: CURRENCY,
            market_hash_name: "AK-47 | Redline (Field-Tested)",
        };

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["appid"], 730);
        assert_eq!(value["currency"], 1);
        assert_eq!(value["market_hash_name"], "AK-47 | Redline (Field-Tested)");
    }

    #[test]
    fn trims_trailing_slash() {
        let steam = SteamMarket::new("http://localhost:9000/".to_owned()).unwrap();
        assert_eq!(steam.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn unreachable_market_is_upstream_error() {
        // port 9 (discard) is closed on loopback
        let steam = SteamMarket::new("http://127.0.0.1:9".to_owned()).unwrap();

        let res = steam.fetch_baseline("AK-47 | Redline (Field-Tested)").await;
        assert!(matches!(res, Err(PricingError::Upstream(_))));
    }
}

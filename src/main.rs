use std::sync::Arc;

use config::Config;
use log::{error, info, warn};
use resolver::PriceResolver;
use sources::{csfloat::CsFloat, steam::SteamMarket};

pub mod api;
pub mod config;
pub mod resolver;
pub mod sources;
pub mod wear;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let steam = match SteamMarket::new(config.steam_url) {
        Ok(steam) => steam,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let csfloat = match CsFloat::new(config.csfloat_api_key, config.csfloat_url) {
        Ok(csfloat) => csfloat,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if !csfloat.is_enabled() {
        warn!("CSFLOAT_API_KEY not set, float-specific pricing is disabled");
    }

    let resolver = Arc::new(PriceResolver::new(steam, csfloat));

    info!("Listening on {}", config.bind_addr);
    warp::serve(api::routes(resolver)).run(config.bind_addr).await;
}

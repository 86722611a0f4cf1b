//! HTTP surface of the pricer
//!
//! `POST /price` answers a single expected price, `POST /price/wears` prices an
//! item across every wear.

use std::{convert::Infallible, sync::Arc};

use log::{error, warn};
use serde::{Deserialize, Serialize};
use warp::{
    http::{Method, StatusCode},
    hyper::body::Bytes,
    reply::{Json, WithStatus},
    Filter, Rejection, Reply,
};

use crate::{
    resolver::{PriceRequest, PriceResolver},
    sources::{BaselineSource, FloatPremiumSource, PricingError},
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct WearsRequest {
    pub item: Option<String>,
}

pub fn routes<B, F>(
    resolver: Arc<PriceResolver<B, F>>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    B: BaselineSource + Send + Sync + 'static,
    F: FloatPremiumSource + Send + Sync + 'static,
{
    let resolver_filter = warp::any().map(move || resolver.clone());

    let price = warp::path("price")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::bytes())
        .and(resolver_filter.clone())
        .and_then(price_handler::<B, F>);

    let wears = warp::path!("price" / "wears")
        .and(warp::method())
        .and(warp::body::bytes())
        .and(resolver_filter)
        .and_then(wears_handler::<B, F>);

    price.or(wears).recover(handle_rejection)
}

async fn price_handler<B, F>(
    method: Method,
    body: Bytes,
    resolver: Arc<PriceResolver<B, F>>,
) -> Result<WithStatus<Json>, Rejection>
where
    B: BaselineSource + Send + Sync + 'static,
    F: FloatPremiumSource + Send + Sync + 'static,
{
    let request: PriceRequest = match parse_body(&method, &body) {
        Ok(request) => request,
        Err(reply) => return Ok(reply),
    };

    match resolver.quote(&request).await {
        Ok(quote) => Ok(warp::reply::with_status(warp::reply::json(&quote), StatusCode::OK)),
        Err(e) => Ok(error_reply(&e)),
    }
}

async fn wears_handler<B, F>(
    method: Method,
    body: Bytes,
    resolver: Arc<PriceResolver<B, F>>,
) -> Result<WithStatus<Json>, Rejection>
where
    B: BaselineSource + Send + Sync + 'static,
    F: FloatPremiumSource + Send + Sync + 'static,
{
    let request: WearsRequest = match parse_body(&method, &body) {
        Ok(request) => request,
        Err(reply) => return Ok(reply),
    };

    let item = request.item.unwrap_or_default();
    match resolver.resolve_all_wears(&item).await {
        Ok(spread) => Ok(warp::reply::with_status(warp::reply::json(&spread), StatusCode::OK)),
        Err(e) => Ok(error_reply(&e)),
    }
}

fn parse_body<T: for<'de> Deserialize<'de>>(
    method: &Method,
    body: &[u8],
) -> Result<T, WithStatus<Json>> {
    if *method != Method::POST {
        return Err(json_error(StatusCode::METHOD_NOT_ALLOWED, "POST only"));
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        json_error(
            StatusCode::BAD_REQUEST,
            &format!("invalid request body: {}", e),
        )
    })
}

pub fn status_for(error: &PricingError) -> StatusCode {
    match error {
        PricingError::Validation(_) => StatusCode::BAD_REQUEST,
        PricingError::FloatOutOfRange(_)
        | PricingError::Upstream(_)
        | PricingError::NoData
        | PricingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(error: &PricingError) -> WithStatus<Json> {
    let status = status_for(error);
    if status.is_server_error() {
        error!("Pricing failed: {}", error);
    }

    json_error(status, &error.to_string())
}

fn json_error(status: StatusCode, message: &str) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: message.to_owned(),
        }),
        status,
    )
}

async fn handle_rejection(err: Rejection) -> Result<WithStatus<Json>, Infallible> {
    if err.is_not_found() {
        return Ok(json_error(StatusCode::NOT_FOUND, "not found"));
    }

    error!("Unhandled rejection: {:?}", err);
    Ok(json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"))
}

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Half-width of the float band searched around the requested float
pub const FLOAT_TOLERANCE: f64 = 0.002;

/// Listings returned per query, cheapest first
pub const LISTING_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBand {
    pub min: f64,
    pub max: f64,
}

impl FloatBand {
    /// The band of floats close enough to `float` to share its premium,
    /// clamped to the `[0, 1]` float domain.
    pub fn around(float: f64) -> Self {
        Self {
            min: (float - FLOAT_TOLERANCE).max(0.0),
            max: (float + FLOAT_TOLERANCE).min(1.0),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize, PartialEq)]
pub struct ListingQuery<'a> {
    pub market_hash_name: &'a str,
    pub sort_by: &'static str,
    pub limit: u32,
    pub min_float: f64,
    pub max_float: f64,
    pub paint_seed: Option<u32>,
}

impl<'a> ListingQuery<'a> {
    pub fn new(hash_name: &'a str, band: FloatBand, paint_seed: Option<u32>) -> Self {
        Self {
            market_hash_name: hash_name,
            sort_by: "lowest_price",
            limit: LISTING_LIMIT,
            min_float: band.min,
            max_float: band.max,
            paint_seed,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Listing {
    /// Price in cents
    pub price: u64,
}

/// The listings endpoint answers either with a bare array or with a
/// paged envelope, depending on the API revision.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum ListingResponse {
    Bare(Vec<Listing>),
    Paged { data: Vec<Listing> },
}

impl ListingResponse {
    pub fn listings(&self) -> &[Listing] {
        match self {
            ListingResponse::Bare(listings) => listings,
            ListingResponse::Paged { data } => data,
        }
    }

    /// Mean listing price in dollars, `None` when nothing is listed
    pub fn get_average(&self) -> Option<f64> {
        let listings = self.listings();
        if listings.is_empty() {
            return None;
        }

        let cents = listings
            .iter()
            .fold(0.0, |acc, listing| acc + listing.price as f64);

        Some(cents / 100.0 / listings.len() as f64)
    }
}

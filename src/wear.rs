use std::{fmt, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::sources::PricingError;

/// Serialized as its market name; decoding goes through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum Wear {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

/// Half-open `[lo, hi)` float ranges, in scan order.
///
/// The top bucket stops short of 1.0, so a float of exactly 1.0 is rejected.
const WEAR_BUCKETS: [(f64, f64, Wear); 5] = [
    (0.00, 0.07, Wear::FactoryNew),
    (0.07, 0.15, Wear::MinimalWear),
    (0.15, 0.38, Wear::FieldTested),
    (0.38, 0.45, Wear::WellWorn),
    (0.45, 1.00, Wear::BattleScarred),
];

impl Wear {
    pub const ALL: [Wear; 5] = [
        Wear::FactoryNew,
        Wear::MinimalWear,
        Wear::FieldTested,
        Wear::WellWorn,
        Wear::BattleScarred,
    ];

    /// Finds the wear bucket for a float value, defaulting to Factory New
    /// when no float is known.
    pub fn classify(value: Option<f64>) -> Result<Wear, PricingError> {
        let Some(value) = value else {
            return Ok(Wear::FactoryNew);
        };

        WEAR_BUCKETS
            .iter()
            .find(|(lo, hi, _)| value >= *lo && value < *hi)
            .map(|(_, _, wear)| *wear)
            .ok_or(PricingError::FloatOutOfRange(value))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "Factory New",
            Wear::MinimalWear => "Minimal Wear",
            Wear::FieldTested => "Field-Tested",
            Wear::WellWorn => "Well-Worn",
            Wear::BattleScarred => "Battle-Scarred",
        }
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Wear {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wear::ALL
            .into_iter()
            .find(|wear| wear.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PricingError::Validation(format!("unknown wear: {}", s)))
    }
}

/// Market hash name shared by every marketplace, e.g. `AK-47 | Redline (Field-Tested)`.
pub fn hash_name(item: &str, wear: Wear) -> String {
    format!("{} ({})", item, wear)
}

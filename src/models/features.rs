use serde::{Deserialize, Serialize};

/// Feature names in the order the model was fit on.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "payload_weight_kg",
    "orbit_code",
    "rocket_code",
    "fuel_code",
    "mission_years",
];

pub const FEATURE_COUNT: usize = 5;

/// The encoded input of a single prediction.
///
/// [`FeatureVector::to_array`] is the only place that decides column order;
/// it must stay in sync with [`FEATURE_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub payload_weight_kg: u32,
    pub orbit_code: u8,
    pub rocket_code: u8,
    pub fuel_code: u8,
    pub mission_years: u32,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.payload_weight_kg),
            f64::from(self.orbit_code),
            f64::from(self.rocket_code),
            f64::from(self.fuel_code),
            f64::from(self.mission_years),
        ]
    }
}

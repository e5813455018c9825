use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;
use crate::error::{EstimateError, Result};

/// Range offered by the payload weight input, in kilograms.
pub const PAYLOAD_WEIGHT_RANGE: RangeInclusive<u32> = 100..=10_000;
/// Range offered by the mission duration input, in years.
pub const MISSION_YEARS_RANGE: RangeInclusive<u32> = 1..=30;

pub const DEFAULT_PAYLOAD_WEIGHT: u32 = 1000;
pub const DEFAULT_MISSION_YEARS: u32 = 10;

/// The five user-entered parameters of a prediction, as collected by the
/// form. Categorical fields stay as raw labels until the estimator encodes
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub payload_weight_kg: u32,
    pub mission_years: u32,
    pub orbit: String,
    pub rocket: String,
    pub fuel: String,
}

impl PredictionInput {
    /// Enforce the ranges the numeric input widgets allow.
    ///
    /// This belongs to the presentation layer; the estimator itself does not
    /// re-check numeric ranges.
    pub fn check_ranges(&self) -> Result<()> {
        check_range(
            "payload_weight_kg",
            self.payload_weight_kg,
            &PAYLOAD_WEIGHT_RANGE,
        )?;
        check_range("mission_years", self.mission_years, &MISSION_YEARS_RANGE)
    }
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            payload_weight_kg: DEFAULT_PAYLOAD_WEIGHT,
            mission_years: DEFAULT_MISSION_YEARS,
            orbit: "LEO".to_string(),
            rocket: "Light".to_string(),
            fuel: "Solid".to_string(),
        }
    }
}

fn check_range(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(EstimateError::InputOutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Result of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub features: FeatureVector,
    /// Linear evaluation before any floor, in millions of USD.
    pub raw_usd_millions: f64,
    /// Value to display, in millions of USD.
    pub usd_millions: f64,
    /// Whether a negative raw value was floored to zero.
    pub clamped: bool,
    /// Display value converted to crores, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crores: Option<f64>,
}

impl Estimate {
    pub fn with_crores(mut self, conversion: CurrencyConversion) -> Self {
        self.crores = Some(conversion.to_crores(self.usd_millions));
        self
    }
}

/// USD millions to local-currency crores (ten million units).
///
/// The rate is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConversion {
    /// Local currency units per USD.
    fx_rate: f64,
}

impl CurrencyConversion {
    pub const DEFAULT_FX_RATE: f64 = 83.0;

    pub fn try_new(fx_rate: f64) -> std::result::Result<Self, String> {
        if fx_rate.is_finite() && fx_rate > 0.0 {
            Ok(Self { fx_rate })
        } else {
            Err(format!("exchange rate must be a positive number, got {fx_rate}"))
        }
    }

    pub fn fx_rate(&self) -> f64 {
        self.fx_rate
    }

    pub fn to_crores(&self, usd_millions: f64) -> f64 {
        usd_millions * self.fx_rate / 10.0
    }

    pub fn to_usd_millions(&self, crores: f64) -> f64 {
        crores * 10.0 / self.fx_rate
    }
}

impl Default for CurrencyConversion {
    fn default() -> Self {
        Self {
            fx_rate: Self::DEFAULT_FX_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_in_range() {
        assert_eq!(PredictionInput::default().check_ranges(), Ok(()));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut input = PredictionInput {
            payload_weight_kg: 100,
            mission_years: 30,
            ..Default::default()
        };
        assert!(input.check_ranges().is_ok());

        input.payload_weight_kg = 10_000;
        input.mission_years = 1;
        assert!(input.check_ranges().is_ok());
    }

    #[test]
    fn rejects_light_payload() {
        let input = PredictionInput {
            payload_weight_kg: 99,
            ..Default::default()
        };
        assert_eq!(
            input.check_ranges(),
            Err(EstimateError::InputOutOfRange {
                field: "payload_weight_kg",
                value: 99,
                min: 100,
                max: 10_000,
            })
        );
    }

    #[test]
    fn rejects_long_mission() {
        let input = PredictionInput {
            mission_years: 31,
            ..Default::default()
        };
        let err = input.check_ranges().unwrap_err();
        assert_eq!(err.to_string(), "mission_years must be between 1 and 30, got 31");
    }

    #[test]
    fn converts_to_crores() {
        let conversion = CurrencyConversion::default();
        assert!((conversion.to_crores(100.0) - 830.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_unusable_exchange_rates() {
        for rate in [0.0, -83.0, f64::NAN, f64::INFINITY] {
            assert!(CurrencyConversion::try_new(rate).is_err(), "{rate}");
        }
        assert_eq!(CurrencyConversion::try_new(90.5).unwrap().fx_rate(), 90.5);
    }
}

//! The prediction core: encode labels, assemble the feature vector, evaluate
//! the linear model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};
use crate::models::*;
use crate::store::ModelStore;

/// What to do with a negative linear evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Report `max(cost, 0)`.
    #[default]
    FloorAtZero,
    /// Report the raw evaluation, negative or not.
    Passthrough,
}

impl ClampPolicy {
    pub fn from_flag(clamp_negative: bool) -> Self {
        if clamp_negative {
            Self::FloorAtZero
        } else {
            Self::Passthrough
        }
    }

    pub fn apply(&self, cost: f64) -> f64 {
        match self {
            Self::FloorAtZero => cost.max(0.0),
            Self::Passthrough => cost,
        }
    }
}

/// Stateless cost estimator over a shared, read-only model.
///
/// Cloning is cheap; clones share the same model.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    model: Arc<LinearModel>,
    encoding: Arc<EncodingTable>,
    clamp: ClampPolicy,
}

impl CostEstimator {
    pub fn new(model: Arc<LinearModel>, encoding: Arc<EncodingTable>, clamp: ClampPolicy) -> Self {
        Self {
            model,
            encoding,
            clamp,
        }
    }

    pub fn from_store(store: &ModelStore, clamp: ClampPolicy) -> Self {
        Self::new(store.model(), store.encoding(), clamp)
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn encoding(&self) -> &EncodingTable {
        &self.encoding
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp
    }

    /// Translate the labels and assemble the feature vector.
    pub fn encode(
        &self,
        payload_weight_kg: u32,
        mission_years: u32,
        orbit: &str,
        rocket: &str,
        fuel: &str,
    ) -> Result<FeatureVector> {
        let orbit = Orbit::from_label(orbit)?;
        let rocket = RocketClass::from_label(rocket)?;
        let fuel = FuelType::from_label(fuel)?;

        Ok(FeatureVector {
            payload_weight_kg,
            orbit_code: self.encoding.orbit_code(orbit),
            rocket_code: self.encoding.rocket_code(rocket),
            fuel_code: self.encoding.fuel_code(fuel),
            mission_years,
        })
    }

    /// Raw linear evaluation, without the clamp policy.
    pub fn evaluate(&self, features: &FeatureVector) -> f64 {
        self.model.evaluate(features)
    }

    /// Raw evaluation, rejected when it is not a finite number. The clamp
    /// would otherwise turn NaN or -inf into a plausible zero.
    fn evaluate_finite(&self, features: &FeatureVector) -> Result<f64> {
        let raw = self.evaluate(features);
        if raw.is_finite() {
            Ok(raw)
        } else {
            tracing::error!(?features, raw, "Model evaluation is not finite");
            Err(EstimateError::NonFiniteEstimate {
                features: *features,
            })
        }
    }

    /// Predicted cost in millions of USD, after the clamp policy.
    pub fn predict(
        &self,
        payload_weight_kg: u32,
        mission_years: u32,
        orbit: &str,
        rocket: &str,
        fuel: &str,
    ) -> Result<f64> {
        let features = self.encode(payload_weight_kg, mission_years, orbit, rocket, fuel)?;
        Ok(self.clamp.apply(self.evaluate_finite(&features)?))
    }

    /// Full pipeline returning the structured result.
    pub fn estimate(&self, input: &PredictionInput) -> Result<Estimate> {
        let features = self
            .encode(
                input.payload_weight_kg,
                input.mission_years,
                &input.orbit,
                &input.rocket,
                &input.fuel,
            )
            .inspect_err(|e| tracing::warn!("Rejected prediction input: {}", e))?;

        let raw = self.evaluate_finite(&features)?;
        let usd_millions = self.clamp.apply(raw);
        tracing::debug!(?features, raw, usd_millions, "Evaluated launch cost");

        Ok(Estimate {
            features,
            raw_usd_millions: raw,
            usd_millions,
            clamped: usd_millions != raw,
            crores: None,
        })
    }
}

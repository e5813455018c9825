use serde::{Deserialize, Serialize};

use super::encoding::{EncodingTable, CODE_COUNT};
use super::estimate::{MISSION_YEARS_RANGE, PAYLOAD_WEIGHT_RANGE};
use super::features::{FeatureVector, FEATURE_COUNT, FEATURE_ORDER};

/// Largest value each feature takes for inputs the form accepts, in
/// [`FEATURE_ORDER`].
fn feature_bounds() -> [f64; FEATURE_COUNT] {
    let max_code = f64::from(CODE_COUNT - 1);
    [
        f64::from(*PAYLOAD_WEIGHT_RANGE.end()),
        max_code,
        max_code,
        max_code,
        f64::from(*MISSION_YEARS_RANGE.end()),
    ]
}

/// A pre-fitted linear regression: one coefficient per feature plus an
/// intercept. Immutable once loaded.
///
/// Every constructed model has finite parameters and cannot overflow for
/// inputs inside the form's ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, String> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `intercept + sum(coefficient_i * feature_i)`, accumulated left to right.
    pub fn evaluate(&self, features: &FeatureVector) -> f64 {
        self.evaluate_array(&features.to_array())
    }

    pub fn evaluate_array(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }

    /// Check that every parameter is finite and that the worst-case
    /// evaluation over in-range inputs stays finite.
    fn validate(&self) -> Result<(), String> {
        if let Some((i, c)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite())
        {
            return Err(format!(
                "coefficient for {} is not finite: {c}",
                FEATURE_ORDER[i]
            ));
        }
        if !self.intercept.is_finite() {
            return Err(format!("intercept is not finite: {}", self.intercept));
        }

        let worst_case = self
            .coefficients
            .iter()
            .zip(feature_bounds())
            .fold(self.intercept.abs(), |acc, (c, max)| acc + c.abs() * max);
        if !worst_case.is_finite() {
            return Err("evaluation overflows for inputs inside the accepted ranges".to_string());
        }
        Ok(())
    }
}

/// On-disk form of a model artifact.
///
/// `feature_order` and `encoding` are optional. When present they describe
/// how the offline fitting step built its inputs and are checked at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_order: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<EncodingTable>,
}

impl ModelArtifact {
    /// Validate the artifact and split it into the model and its encoding
    /// table (the default table when the artifact carries none).
    pub fn into_parts(self) -> Result<(LinearModel, EncodingTable), String> {
        if let Some(order) = &self.feature_order {
            if order.iter().map(String::as_str).ne(FEATURE_ORDER) {
                return Err(format!(
                    "feature order {order:?} does not match expected {FEATURE_ORDER:?}"
                ));
            }
        }

        let coefficients: [f64; FEATURE_COUNT] =
            self.coefficients.as_slice().try_into().map_err(|_| {
                format!(
                    "expected {FEATURE_COUNT} coefficients, found {}",
                    self.coefficients.len()
                )
            })?;

        let model = LinearModel::new(coefficients, self.intercept)?;

        Ok((model, self.encoding.unwrap_or_default()))
    }
}

/// Summary of a loaded model, as exposed by the API and the `model` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub source: String,
    pub feature_order: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl ModelSummary {
    pub fn new(source: impl Into<String>, model: &LinearModel) -> Self {
        Self {
            source: source.into(),
            feature_order: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
            coefficients: model.coefficients.to_vec(),
            intercept: model.intercept,
        }
    }
}

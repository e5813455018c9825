//! Error types for the estimator core.

use thiserror::Error;

use crate::models::{CategoryField, FeatureVector};

/// Errors raised while encoding inputs, loading the model, or checking
/// presentation-layer input ranges.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    /// A categorical label is not one of the enumerated choices for its field.
    #[error("Unknown {field} category: {label:?}")]
    UnknownCategory { field: CategoryField, label: String },

    /// The model artifact could not be loaded, so no prediction can be made.
    #[error("Model unavailable from {source_name}: {reason}")]
    ModelUnavailable { source_name: String, reason: String },

    /// A numeric input lies outside the range its input widget allows.
    #[error("{field} must be between {min} and {max}, got {value}")]
    InputOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// The model evaluated to infinity or NaN for these features.
    #[error("Model produced a non-finite estimate for {features:?}")]
    NonFiniteEstimate { features: FeatureVector },
}

impl EstimateError {
    /// Whether the error was caused by the caller's input (as opposed to the
    /// model artifact).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::InputOutOfRange { .. }
        )
    }
}

/// Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

//! Domain models for the launch cost estimator.
//!
//! # Core Concepts
//!
//! - [`Category`]: the closed label sets of the three categorical inputs
//!   ([`Orbit`], [`RocketClass`], [`FuelType`]).
//! - [`EncodingTable`]: label-to-code mapping, total and collision-free.
//! - [`FeatureVector`]: the fixed-order numeric input of the model.
//! - [`LinearModel`]: pre-fitted coefficients and intercept, read-only.
//! - [`PredictionInput`] / [`Estimate`]: one request and its result.

mod category;
mod encoding;
mod estimate;
mod features;
mod linear;

pub use category::*;
pub use encoding::*;
pub use estimate::*;
pub use features::*;
pub use linear::*;

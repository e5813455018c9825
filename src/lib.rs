//! Satellite launch cost estimation from a pre-trained linear model.
//!
//! The [`estimator::CostEstimator`] turns five form inputs into a predicted
//! cost in millions of USD. The model is loaded once through
//! [`store::ModelStore`] and shared read-only; [`api`] and [`render`] are the
//! presentation layer on top.

pub mod api;
pub mod config;
pub mod error;
pub mod estimator;
pub mod models;
pub mod render;
pub mod store;

pub use error::{EstimateError, Result};

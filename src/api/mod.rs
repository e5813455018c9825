mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::estimator::{ClampPolicy, CostEstimator};
use crate::models::{CurrencyConversion, ModelSummary};
use crate::render::DisplayCurrency;
use crate::store::ModelStore;

/// Shared, read-only state of the server. Cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub estimator: CostEstimator,
    pub summary: Arc<ModelSummary>,
    pub display: DisplayCurrency,
    pub currency: CurrencyConversion,
}

impl AppState {
    pub fn new(store: &ModelStore, clamp: ClampPolicy, display: DisplayCurrency) -> Self {
        let currency = match display {
            DisplayCurrency::Crores(conversion) => conversion,
            DisplayCurrency::UsdMillions => CurrencyConversion::default(),
        };
        Self {
            estimator: CostEstimator::from_store(store, clamp),
            summary: Arc::new(store.summary()),
            display,
            currency,
        }
    }

    /// Override the conversion used for `?crores=true` requests.
    pub fn with_currency(mut self, currency: CurrencyConversion) -> Self {
        self.currency = currency;
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/estimates", post(handlers::create_estimate))
        .route("/model", get(handlers::get_model))
        .route("/categories", get(handlers::get_categories))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::submit_form))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

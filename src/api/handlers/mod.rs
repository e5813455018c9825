use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;

use super::AppState;
use crate::error::EstimateError;
use crate::models::*;
use crate::render::{self, DisplayCurrency, Outcome};

// ============================================================
// Error Handling
// ============================================================

/// Map an estimator error to a response.
///
/// Input errors (unknown category, value outside the widget range) are the
/// caller's to fix and are returned as-is. Anything else is logged and
/// reported with a generic message.
fn estimate_error(e: EstimateError) -> (StatusCode, String) {
    if e.is_input_error() {
        tracing::warn!("Validation error: {}", e);
        return (StatusCode::BAD_REQUEST, e.to_string());
    }

    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn run_estimate(state: &AppState, input: &PredictionInput) -> Result<Estimate, EstimateError> {
    input.check_ranges()?;
    state.estimator.estimate(input)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Form page
// ============================================================

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::render_page(
        &PredictionInput::default(),
        None,
        state.display,
    ))
}

/// Missing or non-numeric fields redisplay the form with the default
/// values and the reason, like any other input error.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<PredictionInput>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::warn!("Rejected form submission: {}", rejection.body_text());
            let page = render::render_page(
                &PredictionInput::default(),
                Some(Outcome::Error(rejection.body_text())),
                state.display,
            );
            return (StatusCode::BAD_REQUEST, Html(page));
        }
    };

    match run_estimate(&state, &input) {
        Ok(estimate) => {
            let page = render::render_page(
                &input,
                Some(Outcome::Estimate(&estimate)),
                state.display,
            );
            (StatusCode::OK, Html(page))
        }
        Err(e) => {
            let (status, message) = estimate_error(e);
            let page = render::render_page(&input, Some(Outcome::Error(message)), state.display);
            (status, Html(page))
        }
    }
}

// ============================================================
// Estimates
// ============================================================

/// Query parameters for creating an estimate.
#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    /// Include the crores conversion. Defaults to the configured display unit.
    pub crores: Option<bool>,
}

pub async fn create_estimate(
    State(state): State<AppState>,
    Query(query): Query<EstimateQuery>,
    Json(input): Json<PredictionInput>,
) -> Result<Json<Estimate>, (StatusCode, String)> {
    let estimate = run_estimate(&state, &input).map_err(estimate_error)?;

    let with_crores = query
        .crores
        .unwrap_or(matches!(state.display, DisplayCurrency::Crores(_)));
    if with_crores {
        Ok(Json(estimate.with_crores(state.currency)))
    } else {
        Ok(Json(estimate))
    }
}

// ============================================================
// Model
// ============================================================

pub async fn get_model(State(state): State<AppState>) -> Json<ModelSummary> {
    Json(state.summary.as_ref().clone())
}

pub async fn get_categories(State(state): State<AppState>) -> Json<EncodingTable> {
    Json(state.estimator.encoding().clone())
}

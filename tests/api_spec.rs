use axum::http::StatusCode;
use axum_test::TestServer;
use launch_cost::api::{create_router, AppState};
use launch_cost::estimator::ClampPolicy;
use launch_cost::models::*;
use launch_cost::render::DisplayCurrency;
use launch_cost::store::ModelStore;

fn test_store() -> ModelStore {
    ModelStore::from_parts(
        LinearModel::new([0.0125, 8.5, 15.0, 4.25, 0.6], -5.0).expect("Invalid model"),
        EncodingTable::default(),
    )
}

fn setup_with(clamp: ClampPolicy, display: DisplayCurrency) -> TestServer {
    let state = AppState::new(&test_store(), clamp, display);
    let app = create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

fn setup() -> TestServer {
    setup_with(ClampPolicy::FloorAtZero, DisplayCurrency::UsdMillions)
}

fn input(payload_weight_kg: u32, mission_years: u32, orbit: &str, rocket: &str, fuel: &str) -> PredictionInput {
    PredictionInput {
        payload_weight_kg,
        mission_years,
        orbit: orbit.to_string(),
        rocket: rocket.to_string(),
        fuel: fuel.to_string(),
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

mod form_page {
    use super::*;

    #[tokio::test]
    async fn renders_defaults() {
        let server = setup();

        let response = server.get("/").await;

        response.assert_status_ok();
        let page = response.text();
        assert!(page.contains("Satellite Launch Cost Prediction"));
        assert!(page.contains("name=\"payload_weight_kg\" min=\"100\" max=\"10000\" value=\"1000\""));
        assert!(page.contains("name=\"mission_years\" min=\"1\" max=\"30\" value=\"10\""));
        assert!(page.contains("<option value=\"Cryogenic\">Cryogenic</option>"));
    }

    #[tokio::test]
    async fn renders_the_estimate_after_submit() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&input(1000, 10, "LEO", "Light", "Solid"))
            .await;

        response.assert_status_ok();
        // -5 + 1000 * 0.0125 + 10 * 0.6
        assert!(response
            .text()
            .contains("Estimated Launch Cost: $13.50 Million USD"));
    }

    #[tokio::test]
    async fn keeps_the_submitted_choices() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&input(2000, 5, "GEO", "Heavy", "Cryogenic"))
            .await;

        let page = response.text();
        assert!(page.contains("<option value=\"GEO\" selected>GEO</option>"));
        assert!(page.contains("<option value=\"Heavy\" selected>Heavy</option>"));
        assert!(page.contains("value=\"2000\""));
    }

    #[tokio::test]
    async fn renders_crores_when_configured() {
        let server = setup_with(
            ClampPolicy::FloorAtZero,
            DisplayCurrency::Crores(CurrencyConversion::default()),
        );

        let response = server
            .post("/predict")
            .form(&input(1000, 10, "LEO", "Light", "Solid"))
            .await;

        // 13.5 * 83 / 10
        assert!(response.text().contains("₹112.05 Crores"));
    }

    #[tokio::test]
    async fn shows_unknown_category_as_bad_request() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&input(1000, 10, "HEO", "Light", "Solid"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let page = response.text();
        assert!(page.contains("Unknown orbit category"));
        assert!(!page.contains("class=\"result\""));
    }

    #[tokio::test]
    async fn shows_out_of_range_weight_as_bad_request() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&input(50, 10, "LEO", "Light", "Solid"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response
            .text()
            .contains("payload_weight_kg must be between 100 and 10000, got 50"));
    }

    #[tokio::test]
    async fn redisplays_the_form_for_a_non_numeric_weight() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&[
                ("payload_weight_kg", "heavy"),
                ("mission_years", "10"),
                ("orbit", "LEO"),
                ("rocket", "Light"),
                ("fuel", "Solid"),
            ])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let page = response.text();
        assert!(page.contains("<form"));
        assert!(page.contains("class=\"error\""));
        assert!(page.contains("Failed to deserialize form body"));
        assert!(!page.contains("class=\"result\""));
    }

    #[tokio::test]
    async fn redisplays_the_form_for_a_missing_field() {
        let server = setup();

        let response = server
            .post("/predict")
            .form(&[("orbit", "LEO"), ("rocket", "Light"), ("fuel", "Solid")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let page = response.text();
        assert!(page.contains("Predict Launch Cost"));
        assert!(page.contains("class=\"error\""));
    }
}

mod estimates {
    use super::*;

    #[tokio::test]
    async fn returns_features_and_cost() {
        let server = setup();

        let response = server
            .post("/api/v1/estimates")
            .json(&input(1000, 10, "LEO", "Medium", "Liquid"))
            .await;

        response.assert_status_ok();
        let estimate: Estimate = response.json();
        assert_eq!(estimate.features.to_array(), [1000.0, 0.0, 1.0, 1.0, 10.0]);
        let expected = -5.0 + 1000.0 * 0.0125 + 15.0 + 4.25 + 10.0 * 0.6;
        assert!((estimate.usd_millions - expected).abs() < 1e-9);
        assert!(!estimate.clamped);
        assert!(estimate.crores.is_none());
    }

    #[tokio::test]
    async fn floors_negative_costs() {
        let server = setup();

        let response = server
            .post("/api/v1/estimates")
            .json(&input(100, 1, "LEO", "Light", "Solid"))
            .await;

        response.assert_status_ok();
        let estimate: Estimate = response.json();
        assert!(estimate.raw_usd_millions < 0.0);
        assert_eq!(estimate.usd_millions, 0.0);
        assert!(estimate.clamped);
    }

    #[tokio::test]
    async fn passes_negative_costs_through_when_clamping_is_off() {
        let server = setup_with(ClampPolicy::Passthrough, DisplayCurrency::UsdMillions);

        let response = server
            .post("/api/v1/estimates")
            .json(&input(100, 1, "LEO", "Light", "Solid"))
            .await;

        let estimate: Estimate = response.json();
        assert!(estimate.usd_millions < 0.0);
        assert_eq!(estimate.usd_millions, estimate.raw_usd_millions);
    }

    #[tokio::test]
    async fn adds_crores_on_request() {
        let server = setup();

        let response = server
            .post("/api/v1/estimates")
            .add_query_param("crores", true)
            .json(&input(1000, 10, "LEO", "Light", "Solid"))
            .await;

        response.assert_status_ok();
        let estimate: Estimate = response.json();
        let crores = estimate.crores.expect("crores missing");
        assert!((crores - 112.05).abs() < 1e-9);
    }

    #[tokio::test]
    async fn rejects_unknown_rocket() {
        let server = setup();

        let response = server
            .post("/api/v1/estimates")
            .json(&input(1000, 10, "LEO", "Super Heavy", "Solid"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Unknown rocket category: \"Super Heavy\"");
    }

    #[tokio::test]
    async fn rejects_mission_longer_than_thirty_years() {
        let server = setup();

        let response = server
            .post("/api/v1/estimates")
            .json(&input(1000, 31, "LEO", "Light", "Solid"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.text(),
            "mission_years must be between 1 and 30, got 31"
        );
    }
}

mod model {
    use super::*;

    #[tokio::test]
    async fn exposes_coefficients_in_feature_order() {
        let server = setup();

        let response = server.get("/api/v1/model").await;

        response.assert_status_ok();
        let summary: ModelSummary = response.json();
        assert_eq!(summary.feature_order, FEATURE_ORDER.to_vec());
        assert_eq!(summary.coefficients, vec![0.0125, 8.5, 15.0, 4.25, 0.6]);
        assert_eq!(summary.intercept, -5.0);
    }

    #[tokio::test]
    async fn exposes_the_encoding_table() {
        let server = setup();

        let response = server.get("/api/v1/categories").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["orbit"]["GEO"], 2);
        assert_eq!(body["rocket"]["Light"], 0);
        assert_eq!(body["fuel"]["Liquid"], 1);
    }
}

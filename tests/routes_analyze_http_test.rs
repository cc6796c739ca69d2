// ABOUTME: HTTP integration tests for the recipe analysis route
// ABOUTME: Drives POST /api/ai/analyze through the full router and middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{
    create_seeded_database, create_test_database, estimate_reply, test_resources,
    ScriptedProvider,
};
use helpers::axum_test::AxumTestRequest;
use nutrilabel_server::routes::router;
use serde_json::{json, Value};

const ANALYZE: &str = "/api/ai/analyze";

fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 0.05)
}

// ============================================================================
// Successful analysis
// ============================================================================

#[tokio::test]
async fn test_analyze_uses_database_values() {
    let database = create_seeded_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({
            "ingredients": [{ "name": "Rice", "quantity": 200, "unit": "g" }],
            "servingSize": 250
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["source"], "database");
    assert!(approx(&body["nutrition"]["calories"], 130.0));
    assert_eq!(body["nutrition"]["fssaiCompliant"], true);
    assert!(approx(&body["servingSize"], 250.0));
    assert!(approx(&body["perServing"]["calories"], 325.0));
    assert_eq!(body["unmatchedIngredients"], json!([]));
}

#[tokio::test]
async fn test_analyze_falls_back_to_static_table() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({
            "ingredients": [
                { "name": "basmati rice", "quantity": 1, "unit": "cup" },
                { "name": "salt", "quantity": 1, "unit": "tsp" }
            ]
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["source"], "local-fallback");
    assert!(approx(&body["servingSize"], 100.0));
    assert!(body["nutrition"]["fssaiNotes"].is_string());
}

#[tokio::test]
async fn test_analyze_uses_remote_estimate_for_partial_match() {
    let database = create_seeded_database().await.unwrap();
    let provider =
        ScriptedProvider::always(&estimate_reply(210.0, 18.0, 9.0, 12.0, true, "Looks fine"));
    let app = router(test_resources(database, Some(provider.clone())));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({
            "ingredients": [
                { "name": "Chicken", "quantity": 150 },
                { "name": "dragonfruit glaze", "quantity": 50 }
            ]
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["source"], "ai");
    assert!(approx(&body["nutrition"]["calories"], 210.0));
    assert_eq!(body["nutrition"]["fssaiNotes"], "Looks fine");
    assert_eq!(provider.calls(), 1);
}

// ============================================================================
// Client errors
// ============================================================================

#[tokio::test]
async fn test_analyze_rejects_non_food() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": "zxqqw", "quantity": 50 }] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONTENT_REJECTED");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("No valid food ingredients recognized"));
}

#[tokio::test]
async fn test_analyze_surfaces_model_rejection() {
    let database = create_test_database().await.unwrap();
    let provider = ScriptedProvider::always(&estimate_reply(
        0.0,
        0.0,
        0.0,
        0.0,
        false,
        "Input does not describe edible ingredients",
    ));
    let app = router(test_resources(database, Some(provider)));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": "rice", "quantity": 100 }] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Input does not describe edible ingredients");
}

#[tokio::test]
async fn test_analyze_requires_ingredients() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Ingredients array is required");
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_analyze_rejects_non_positive_quantity() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": "rice", "quantity": -1 }] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_analyze_rejects_quantity_overflowing_grams() {
    let database = create_seeded_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": "rice", "quantity": 1e306, "unit": "kg" }] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_analyze_malformed_json_is_bad_request() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let response = AxumTestRequest::post(ANALYZE)
        .raw_json("{\"ingredients\": [")
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].is_string());
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_analyze_rejects_oversized_body() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));
    let name = "x".repeat(300 * 1024);

    let response = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": name, "quantity": 1 }] }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.header("x-request-id").is_some());
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_analyze_response_carries_request_id() {
    let database = create_test_database().await.unwrap();
    let app = router(test_resources(database, None));

    let generated = AxumTestRequest::post(ANALYZE)
        .json(&json!({ "ingredients": [{ "name": "rice", "quantity": 100 }] }))
        .send(app.clone())
        .await;
    assert!(generated.header("x-request-id").is_some_and(|id| !id.is_empty()));

    let propagated = AxumTestRequest::post(ANALYZE)
        .header("x-request-id", "req-1234")
        .json(&json!({ "ingredients": [{ "name": "rice", "quantity": 100 }] }))
        .send(app)
        .await;
    assert_eq!(propagated.header("x-request-id"), Some("req-1234"));
}

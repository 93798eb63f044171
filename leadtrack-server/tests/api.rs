//! End-to-end route tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use leadtrack_core::TokenKeys;
use leadtrack_server::db;
use leadtrack_server::{build_router, AppState};

const TEST_SECRET: &[u8] = b"test-secret";

async fn test_app() -> Router {
    let store = db::connect("sqlite::memory:").await.expect("sqlite store");
    store.migrate().await.expect("migrate");
    let state = Arc::new(AppState::new(store, TokenKeys::new(TEST_SECRET), 10));
    build_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_body(user_name: &str) -> Value {
    json!({
        "name": "Ramesh Kumar",
        "userName": user_name,
        "password": "hunter2",
        "occupation": "Sales"
    })
}

fn lead_body(employee: &str, location: &str) -> Value {
    json!({
        "storeName": "Big Bazaar",
        "storeType": "Retail",
        "storeLocation": location,
        "contactNo": "9876543210",
        "employeeName": employee,
        "status": "Interested",
        "remark": "call after 5pm",
        "followUpDate": "2031-01-15T10:00:00Z"
    })
}

/// Register a user and log in, returning the bearer token.
async fn register_and_login(app: &Router, user_name: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/user", register_body(user_name)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "userName": user_name, "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["jwtToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint() {
    let app = test_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/user", register_body("ramesh")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/user", register_body("ramesh")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "user already exists");
}

#[tokio::test]
async fn registration_requires_password() {
    let app = test_app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/user",
            json!({ "name": "Ramesh", "userName": "ramesh" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = test_app().await;
    register_and_login(&app, "ramesh").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "userName": "ramesh", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid password");

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "userName": "nobody", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid user");
}

#[tokio::test]
async fn token_gates_protected_endpoints() {
    let app = test_app().await;
    let token = register_and_login(&app, "ramesh").await;

    // No token: 401
    let response = app.clone().oneshot(get("/api/user/leadsdata")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token: 403
    let response = app
        .clone()
        .oneshot(get_bearer("/api/user/leadsdata", "not-a-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Token signed with another secret: 403
    let foreign = TokenKeys::new(b"other-secret")
        .sign(&leadtrack_core::Claims::new("ramesh", chrono::Duration::hours(1)))
        .unwrap();
    let response = app
        .clone()
        .oneshot(get_bearer("/api/user/leadsdata", &foreign))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Valid token: 200, empty list so far
    let response = app
        .clone()
        .oneshot(get_bearer("/api/user/leadsdata", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn my_leads_match_username_case_insensitively() {
    let app = test_app().await;
    let token = register_and_login(&app, "ramesh").await;

    // Assigned with different casing; still belongs to the token's user
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/lead", lead_body("RAMESH", "Chennai")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_bearer("/api/user/leadsdata", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["storeLocation"], "Chennai");
}

#[tokio::test]
async fn lead_listing_filters() {
    let app = test_app().await;

    for (employee, location) in [("ramesh", "Chennai"), ("priya", "Mumbai")] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/lead", lead_body(employee, location)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Blank filters return everything
    let response = app
        .clone()
        .oneshot(get("/api/leadsdata?storeLocation=&userInput="))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    // Location substring only
    let response = app
        .clone()
        .oneshot(get("/api/leadsdata?storeLocation=Chen"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["storeLocation"], "Chennai");

    // Employee substring only
    let response = app
        .clone()
        .oneshot(get("/api/leadsdata?userInput=pri"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["employeeName"], "priya");
}

#[tokio::test]
async fn lead_crud_roundtrip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/lead", lead_body("ramesh", "Chennai")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let lead_id = body_json(response).await["leadId"].as_i64().unwrap();

    // Read it back
    let response = app
        .clone()
        .oneshot(get(&format!("/api/leadsdata/{lead_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["storeName"], "Big Bazaar");
    assert_eq!(body["isFollowedUp"], false);

    // Overwrite
    let mut updated = lead_body("ramesh", "Coimbatore");
    updated["status"] = json!("Converted");
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/api/lead/{lead_id}"), updated))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/leadsdata/{lead_id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["storeLocation"], "Coimbatore");
    assert_eq!(body["status"], "Converted");

    // Delete, then the lead is gone
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/api/lead/{lead_id}"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/leadsdata/{lead_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_ids_map_to_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/lead/999", lead_body("x", "y")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/api/user/999", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/leadUpdate/followUp",
            json!({ "leadId": 999, "isFollowedUp": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lead_creation_validates_required_fields() {
    let app = test_app().await;
    let mut body = lead_body("ramesh", "Chennai");
    body["storeName"] = json!("");

    let response = app
        .oneshot(json_request("POST", "/api/lead", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "storeName is required");
}

#[tokio::test]
async fn follow_up_toggle_persists() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/lead", lead_body("ramesh", "Chennai")))
        .await
        .unwrap();
    let lead_id = body_json(response).await["leadId"].as_i64().unwrap();

    // Missing leadId is a 400
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leadUpdate/followUp",
            json!({ "isFollowedUp": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leadUpdate/followUp",
            json!({ "leadId": lead_id, "isFollowedUp": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/leadsdata/{lead_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["isFollowedUp"], true);
}

#[tokio::test]
async fn user_crud_roundtrip() {
    let app = test_app().await;
    register_and_login(&app, "ramesh").await;

    // List includes the user, without any password material
    let response = app.clone().oneshot(get("/api/user")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let user = &body.as_array().unwrap()[0];
    assert_eq!(user["userName"], "ramesh");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    let id = user["id"].as_i64().unwrap();

    // Overwrite, then log in with the new password
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/user/{id}"),
            json!({
                "name": "Ramesh K",
                "userName": "ramesh",
                "password": "new-password",
                "occupation": "Senior Sales"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "userName": "ramesh", "password": "new-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete, then 404 on fetch
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/api/user/{id}"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get(&format!("/api/user/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

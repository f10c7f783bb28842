//! End-to-end tests for `POST /check` against a mocked Steam Community

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use inventory_value::web::create_router;
use inventory_value::{InventoryValuator, ValuationConfig};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STEAM_ID: &str = "76561198390944700";

fn test_config(mock_server: &MockServer) -> ValuationConfig {
    ValuationConfig {
        price_request_interval: Duration::from_millis(1),
        retry_backoff: Duration::from_millis(1),
        request_timeout: Duration::from_secs(2),
        ..ValuationConfig::with_base_url(mock_server.uri())
    }
}

async fn post_check(mock_server: &MockServer, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let valuator = InventoryValuator::from_config(test_config(mock_server)).unwrap();
    let response = create_router(Arc::new(valuator))
        .oneshot(
            Request::post("/check")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn profile_link(mock_server: &MockServer) -> String {
    format!("{}/profiles/{}", mock_server.uri(), STEAM_ID)
}

fn widget_inventory() -> serde_json::Value {
    serde_json::json!({
        "success": 1,
        "total_inventory_count": 2,
        "assets": [
            {"appid": 730, "contextid": "2", "assetid": "1001", "classid": "310776", "instanceid": "302028390", "amount": "1"},
            {"appid": 730, "contextid": "2", "assetid": "1002", "classid": "310776", "instanceid": "302028390", "amount": "1"}
        ],
        "descriptions": [
            {"appid": 730, "classid": "310776", "instanceid": "302028390", "market_hash_name": "Widget",
             "name": "Widget", "type": "Base Grade Tool", "marketable": 1}
        ]
    })
}

async fn mount_inventory(mock_server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/inventory/{}/730/2", STEAM_ID)))
        .and(query_param("l", "english"))
        .and(query_param("count", "2000"))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn empty_link_is_rejected() {
    let mock_server = MockServer::start().await;

    let (status, json) = post_check(&mock_server, serde_json::json!({"link": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"error": "No link"}));
}

#[tokio::test]
async fn two_widgets_are_worth_three() {
    let mock_server = MockServer::start().await;
    mount_inventory(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(widget_inventory()),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/market/priceoverview/"))
        .and(query_param("appid", "730"))
        .and(query_param("currency", "5"))
        .and(query_param("market_hash_name", "Widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "lowest_price": "1,50 $",
            "volume": "12",
            "median_price": "1,55 $"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let link = profile_link(&mock_server);
    let (status, json) = post_check(&mock_server, serde_json::json!({ "link": link })).await;

    assert_eq!(status, StatusCode::OK);
    let total = json["total_value"].as_f64().unwrap();
    assert!((total - 3.0).abs() < 1e-9, "total was {total}");
}

#[tokio::test]
async fn vanity_profile_is_resolved_from_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/gaben"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<script>g_rgProfileData = {{"url":"","steamid":"{}","personaname":"gaben"}};</script>"#,
            STEAM_ID
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_inventory(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": 1, "total_inventory_count": 0})),
    )
    .await;

    let link = format!("{}/id/gaben", mock_server.uri());
    let (status, json) = post_check(&mock_server, serde_json::json!({ "link": link })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_value"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn unsuccessful_inventory_is_server_error() {
    let mock_server = MockServer::start().await;
    mount_inventory(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": false})),
    )
    .await;

    let link = profile_link(&mock_server);
    let (status, json) = post_check(&mock_server, serde_json::json!({ "link": link })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn private_inventory_reports_status() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server, ResponseTemplate::new(403).set_body_string("null")).await;

    let link = profile_link(&mock_server);
    let (status, json) = post_check(&mock_server, serde_json::json!({ "link": link })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "HTTP error: 403 Forbidden");
}

#[tokio::test]
async fn rate_limited_prices_degrade_to_zero() {
    let mock_server = MockServer::start().await;
    mount_inventory(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(widget_inventory()),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/market/priceoverview/"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let link = profile_link(&mock_server);
    let (status, json) = post_check(&mock_server, serde_json::json!({ "link": link })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_value"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn overrides_reach_the_price_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/inventory/{}/440/2", STEAM_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_inventory()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/market/priceoverview/"))
        .and(query_param("appid", "440"))
        .and(query_param("currency", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "lowest_price": "$2.25"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let link = profile_link(&mock_server);
    let (status, json) = post_check(
        &mock_server,
        serde_json::json!({ "link": link, "app_id": 440, "currency": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_value"].as_f64(), Some(4.5));
}

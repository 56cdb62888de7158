//! Integration tests for the live occupancy and area table endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn live_lists_locations_and_area_totals() {
    let upstream = common::spawn_upstream(StatusCode::OK, common::UPSTREAM_BODY).await;
    let app = common::build_test_app(None, &upstream);

    let response = get(app, "/api/live").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["as_of"].is_string());

    let locations = data["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 4);
    assert_eq!(locations[0]["raw_name"], "UV Strength Landing");
    assert_eq!(locations[0]["name"], "Village Strength Area");
    assert_eq!(locations[0]["percent"], 50.0);
    // Shown under its friendly name even though no area counts it.
    assert_eq!(locations[3]["name"], "Village Functional Rig");
    assert_eq!(locations[2]["count"], 10);

    let strength = &data["areas"]["Village Strength Area"];
    assert_eq!(strength["count"], 8);
    assert_eq!(strength["capacity"], 20);
    assert_eq!(strength["percent"], 40.0);
}

#[tokio::test]
async fn live_reports_every_area_even_without_data() {
    let upstream = common::spawn_upstream(StatusCode::OK, "[]").await;
    let app = common::build_test_app(None, &upstream);

    let json = body_json(get(app, "/api/live").await).await;
    let areas = json["data"]["areas"].as_object().unwrap();
    assert_eq!(areas.len(), 7);
    for area in areas.values() {
        assert_eq!(area["count"], 0);
        assert_eq!(area["percent"], 0.0);
    }
}

#[tokio::test]
async fn live_accepts_single_object_body() {
    let body = r#"{"LocationName": "HSC Cardio", "TotalCapacity": 40, "LastCount": 20}"#;
    let upstream = common::spawn_upstream(StatusCode::OK, body).await;
    let app = common::build_test_app(None, &upstream);

    let json = body_json(get(app, "/api/live").await).await;
    assert_eq!(json["data"]["locations"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["areas"]["HSC Cardio"]["percent"], 50.0);
}

#[tokio::test]
async fn live_upstream_error_status_returns_502() {
    let upstream = common::spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "down").await;
    let app = common::build_test_app(None, &upstream);

    let response = get(app, "/api/live").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn live_unreachable_upstream_returns_502() {
    let upstream = common::unreachable_upstream().await;
    let app = common::build_test_app(None, &upstream);

    let response = get(app, "/api/live").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn live_malformed_body_returns_502() {
    let upstream = common::spawn_upstream(StatusCode::OK, "\"not a list\"").await;
    let app = common::build_test_app(None, &upstream);

    let response = get(app, "/api/live").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "UPSTREAM_MALFORMED");
}

#[tokio::test]
async fn areas_lists_the_standard_table() {
    let upstream = common::unreachable_upstream().await;
    let app = common::build_test_app(None, &upstream);

    let response = get(app, "/api/areas").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let areas = json["data"].as_array().unwrap();
    assert_eq!(areas.len(), 7);
    assert_eq!(areas[0]["area"], "Village Strength Area");
    assert_eq!(areas[0]["raw_names"][0], "UV Strength Landing");
}

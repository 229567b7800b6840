//! End-to-end tests of the HTTP API against an in-memory store.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use subway_server::store::{SnapshotFile, SubwayStore};
use subway_server::web::{AppState, create_router};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(SubwayStore::in_memory()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

async fn station(app: &Router, name: &str) -> u64 {
    let (status, body) = send(app, Method::POST, "/stations", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_u64().unwrap()
}

fn station_names(line: &Value) -> Vec<String> {
    line["stations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn line_lifecycle() {
    let app = app();
    let a = station(&app, "A").await;
    let b = station(&app, "B").await;
    let c = station(&app, "C").await;
    let d = station(&app, "D").await;

    let (status, line) = send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 2", "color": "green",
            "upStationId": a, "downStationId": c, "distance": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(station_names(&line), vec!["A", "C"]);
    let id = line["id"].as_u64().unwrap();

    // Split A -> C at B.
    let (status, line) = send(
        &app,
        Method::POST,
        &format!("/lines/{id}/sections"),
        Some(json!({ "upStationId": a, "downStationId": b, "distance": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(station_names(&line), vec!["A", "B", "C"]);
    assert_eq!(line["distance"], json!(10));

    // Append C -> D.
    let (status, line) = send(
        &app,
        Method::POST,
        &format!("/lines/{id}/sections"),
        Some(json!({ "upStationId": c, "downStationId": d, "distance": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(station_names(&line), vec!["A", "B", "C", "D"]);

    let (status, sections) =
        send(&app, Method::GET, &format!("/lines/{id}/sections"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sections.as_array().unwrap().len(), 3);

    // Remove interior B: A -> C merges back to 10.
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/lines/{id}/sections?stationId={b}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, line) = send(&app, Method::GET, &format!("/lines/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(station_names(&line), vec!["A", "C", "D"]);
    assert_eq!(line["distance"], json!(15));

    let (status, line) = send(
        &app,
        Method::PUT,
        &format!("/lines/{id}"),
        Some(json!({ "name": "Line 2", "color": "lime" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["color"], json!("lime"));

    let (status, _) = send(&app, Method::DELETE, &format!("/lines/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/lines/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chain_errors_are_bad_requests() {
    let app = app();
    let a = station(&app, "A").await;
    let b = station(&app, "B").await;
    let x = station(&app, "X").await;
    let y = station(&app, "Y").await;

    let (_, line) = send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 1", "color": "blue",
            "upStationId": a, "downStationId": b, "distance": 10
        })),
    )
    .await;
    let id = line["id"].as_u64().unwrap();
    let sections = format!("/lines/{id}/sections");

    // Both stations already on the line.
    let (status, body) = send(
        &app,
        Method::POST,
        &sections,
        Some(json!({ "upStationId": a, "downStationId": b, "distance": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already on the line"));

    // Neither station on the line.
    let (status, _) = send(
        &app,
        Method::POST,
        &sections,
        Some(json!({ "upStationId": x, "downStationId": y, "distance": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Split too long.
    let (status, _) = send(
        &app,
        Method::POST,
        &sections,
        Some(json!({ "upStationId": a, "downStationId": x, "distance": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive distance.
    let (status, _) = send(
        &app,
        Method::POST,
        &sections,
        Some(json!({ "upStationId": b, "downStationId": x, "distance": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Only one section left.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("{sections}?stationId={a}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("a line must keep at least one section"));

    let (_, line) = send(&app, Method::GET, &format!("/lines/{id}"), None).await;
    assert_eq!(station_names(&line), vec!["A", "B"]);
}

#[tokio::test]
async fn unknown_station_is_not_found() {
    let app = app();
    let a = station(&app, "A").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 1", "color": "blue",
            "upStationId": a, "downStationId": 999, "distance": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn station_on_a_line_cannot_be_deleted() {
    let app = app();
    let a = station(&app, "A").await;
    let b = station(&app, "B").await;
    let c = station(&app, "C").await;
    send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 1", "color": "blue",
            "upStationId": a, "downStationId": b, "distance": 10
        })),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/stations/{a}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &format!("/stations/{c}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, stations) = send(&app, Method::GET, "/stations", None).await;
    assert_eq!(stations.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_station_name_conflicts() {
    let app = app();
    station(&app, "A").await;

    let (status, _) = send(&app, Method::POST, "/stations", Some(json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn snapshot_backed_store_persists_through_api() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subway.json");

    let app = create_router(AppState::new(
        SubwayStore::open(SnapshotFile::new(&path)).unwrap(),
    ));
    let a = station(&app, "A").await;
    let b = station(&app, "B").await;
    let (_, line) = send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 1", "color": "blue",
            "upStationId": a, "downStationId": b, "distance": 10
        })),
    )
    .await;
    let id = line["id"].as_u64().unwrap();

    let reopened = create_router(AppState::new(
        SubwayStore::open(SnapshotFile::new(&path)).unwrap(),
    ));
    let (status, line) = send(&reopened, Method::GET, &format!("/lines/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(station_names(&line), vec!["A", "B"]);
}

#[tokio::test]
async fn malformed_input_gets_json_error_body() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/lines/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/stations", Some(json!({ "title": "A" }))).await;
    assert!(status.is_client_error());
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, body) = send(&app, Method::DELETE, "/lines/1/sections?stationId=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::DELETE, "/lines/1/sections", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn merge_that_would_overflow_is_rejected() {
    let app = app();
    let a = station(&app, "A").await;
    let b = station(&app, "B").await;
    let c = station(&app, "C").await;
    let max = u32::MAX;

    let (_, line) = send(
        &app,
        Method::POST,
        "/lines",
        Some(json!({
            "name": "Line 1", "color": "blue",
            "upStationId": a, "downStationId": b, "distance": max
        })),
    )
    .await;
    let id = line["id"].as_u64().unwrap();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/lines/{id}/sections"),
        Some(json!({ "upStationId": b, "downStationId": c, "distance": max })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/lines/{id}/sections?stationId={b}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too large"));

    let (_, line) = send(&app, Method::GET, &format!("/lines/{id}"), None).await;
    assert_eq!(station_names(&line), vec!["A", "B", "C"]);
    assert_eq!(line["distance"], json!(2 * u64::from(max)));
}

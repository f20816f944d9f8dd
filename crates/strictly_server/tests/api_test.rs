//! Tests for the REST routes, driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use strictly_server::{SessionManager, router};
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn new_aabb(app: &Router) {
    let (status, body) = send(
        app,
        "POST",
        "/new",
        Some(json!({"rows": 2, "cols": 2, "values": ["A", "A", "B", "B"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

fn app() -> Router {
    router(SessionManager::new())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_pick_before_new_game() {
    let app = app();
    let (status, body) = send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "error", "message": "game not created", "kind": "no_active_game"})
    );

    let (status, body) = send(&app, "POST", "/resolve", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "no_active_game");
}

#[tokio::test]
async fn test_shape_mismatch() {
    let (status, body) = send(
        &app(),
        "POST",
        "/new",
        Some(json!({"rows": 2, "cols": 2, "values": ["A"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "shape_mismatch");
}

#[tokio::test]
async fn test_match_flow() {
    let app = app();
    new_aabb(&app).await;

    let (status, first) = send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({"status": "ok", "value": "A", "match": null, "flipped": [0, 0]})
    );

    let (_, second) = send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 1}))).await;
    assert_eq!(second["match"], true);
    assert!(second.get("pending_hide").is_none());

    let (status, body) = send(&app, "POST", "/resolve", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "nothing_to_resolve");
}

#[tokio::test]
async fn test_mismatch_flow() {
    let app = app();
    new_aabb(&app).await;

    send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 0}))).await;
    let (_, second) = send(&app, "POST", "/pick", Some(json!({"row": 1, "col": 0}))).await;
    assert_eq!(second["match"], false);
    assert_eq!(second["value"], "B");
    assert_eq!(second["pending_hide"], json!([[0, 0], [1, 0]]));

    let (status, third) = send(&app, "POST", "/pick", Some(json!({"row": -4, "col": 9}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(third["kind"], "awaiting_resolve");

    let (status, resolved) = send(&app, "POST", "/resolve", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        resolved,
        json!({"status": "ok", "resolved": true, "hidden": [[0, 0], [1, 0]]})
    );

    let (status, _) = send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 0}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_pick_errors() {
    let app = app();
    new_aabb(&app).await;

    let (_, body) = send(&app, "POST", "/pick", Some(json!({"row": -1, "col": 0}))).await;
    assert_eq!(body["kind"], "out_of_bounds");

    send(&app, "POST", "/pick", Some(json!({"row": 1, "col": 1}))).await;
    let (_, body) = send(&app, "POST", "/pick", Some(json!({"row": 1, "col": 1}))).await;
    assert_eq!(body["kind"], "cell_already_revealed");
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = app();
    new_aabb(&app).await;
    let (status, body) = send(&app, "POST", "/pick", Some(json!({"row": "zero"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn test_board_hides_face_down_values() {
    let app = app();
    new_aabb(&app).await;
    send(&app, "POST", "/pick", Some(json!({"row": 1, "col": 1}))).await;

    let (status, board) = send(&app, "GET", "/board", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["rows"], 2);
    assert_eq!(board["complete"], false);

    let cells = board["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 4);
    assert!(cells[0].get("value").is_none());
    assert_eq!(cells[3], json!({"state": "pending", "value": "B"}));
}

#[tokio::test]
async fn test_new_game_mid_game_replaces_board() {
    let app = app();
    new_aabb(&app).await;
    send(&app, "POST", "/pick", Some(json!({"row": 0, "col": 0}))).await;
    new_aabb(&app).await;

    let (_, board) = send(&app, "GET", "/board", None).await;
    let cells = board["cells"].as_array().unwrap();
    assert!(cells.iter().all(|cell| cell["state"] == "face_down"));
}

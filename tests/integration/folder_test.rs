//! Integration tests for folder operations.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use arbor_core::types::OwnerId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let (app, _) = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_owner_is_unauthorized() {
    let (app, _) = TestApp::new().await;

    let response = app.request("GET", "/api/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let req = Request::builder()
        .uri("/api/folders")
        .header("X-Owner-Id", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_browse_nested_folder() {
    let (app, _) = TestApp::new().await;
    let owner = OwnerId::new();

    let docs = app.create_folder(owner, "Docs", None).await;
    let year = app.create_folder(owner, "2024", Some(&docs)).await;

    let root = app.request("GET", "/api/folders", None, Some(owner)).await;
    assert_eq!(root.status, StatusCode::OK);
    assert!(root.body["data"]["folder"].is_null());
    assert_eq!(root.body["data"]["breadcrumbs"], json!([]));
    assert_eq!(root.body["data"]["folders"][0]["name"], "Docs");

    let inner = app
        .request("GET", &format!("/api/folders/{year}"), None, Some(owner))
        .await;
    assert_eq!(inner.status, StatusCode::OK);
    assert_eq!(inner.body["data"]["folder"]["id"], year.as_str());
    let trail: Vec<_> = inner.body["data"]["breadcrumbs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(trail, ["Docs", "2024"]);
}

#[tokio::test]
async fn test_foreign_and_malformed_ids_are_not_found() {
    let (app, _) = TestApp::new().await;
    let alice = OwnerId::new();
    let bob = OwnerId::new();
    let docs = app.create_folder(alice, "Docs", None).await;

    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app
        .request("GET", "/api/folders/12", None, Some(alice))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Sneaky", "parent_id": docs })),
            Some(bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_folder_name_is_rejected() {
    let (app, _) = TestApp::new().await;

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "  " })), Some(OwnerId::new()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_requires_post_and_confirmation() {
    let (app, _) = TestApp::new().await;
    let owner = OwnerId::new();
    let docs = app.create_folder(owner, "Docs", None).await;
    let path = format!("/api/folders/{docs}/delete");

    let response = app.request("GET", &path, None, Some(owner)).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let req = Request::builder()
        .method("POST")
        .uri(&path)
        .header("X-Owner-Id", owner.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", &path, Some(json!({ "confirm": false })), Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    // Still there after the refused attempts.
    let response = app
        .request("GET", &format!("/api/folders/{docs}"), None, Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", &path, Some(json!({ "confirm": true })), Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders_deleted"], 1);
    assert!(response.body["data"]["parent_folder_id"].is_null());

    let response = app
        .request("POST", &path, Some(json!({ "confirm": true })), Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_into_own_subtree_is_conflict() {
    let (app, _) = TestApp::new().await;
    let owner = OwnerId::new();
    let a = app.create_folder(owner, "a", None).await;
    let b = app.create_folder(owner, "b", Some(&a)).await;

    let response = app
        .request(
            "POST",
            &format!("/api/folders/{a}/move"),
            Some(json!({ "parent_id": b })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CYCLE_DETECTED");

    let response = app
        .request(
            "POST",
            &format!("/api/folders/{b}/move"),
            Some(json!({ "parent_id": null })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["parent_id"].is_null());
}

//! Integration tests for file operations.

use axum::http::{StatusCode, header};
use serde_json::json;

use arbor_core::types::OwnerId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_and_download() {
    let (app, blobs) = TestApp::new().await;
    let owner = OwnerId::new();
    let docs = app.create_folder(owner, "Docs", None).await;

    let response = app
        .upload(owner, Some(&docs), &[("a.txt", "alpha"), ("b.txt", "beta")])
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["stored"], 2);
    assert_eq!(blobs.len().await, 2);

    let file_id = response.body["data"]["items"][0]["file"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let meta = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(owner))
        .await;
    assert_eq!(meta.status, StatusCode::OK);
    assert_eq!(meta.body["data"]["name"], "a.txt");
    assert_eq!(meta.body["data"]["folder_id"], docs.as_str());

    let content = app
        .request("GET", &format!("/api/files/{file_id}/content"), None, Some(owner))
        .await;
    assert_eq!(content.status, StatusCode::OK);
    assert_eq!(&content.bytes[..], b"alpha");
    assert_eq!(
        content.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"a.txt\""
    );

    let foreign = app
        .request("GET", &format!("/api/files/{file_id}/content"), None, Some(OwnerId::new()))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_reports_each_item() {
    let (app, blobs) = TestApp::new().await;
    let owner = OwnerId::new();

    let response = app
        .upload(owner, None, &[("good.txt", "ok"), ("empty.txt", "")])
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert!(data["folder_id"].is_null());
    assert_eq!(data["stored"], 1);
    assert_eq!(data["rejected"], 1);
    assert_eq!(data["items"][1]["status"], "rejected");
    assert_eq!(data["items"][1]["error"], "VALIDATION_ERROR");
    assert_eq!(blobs.len().await, 1);
}

#[tokio::test]
async fn test_upload_into_foreign_folder_is_not_found() {
    let (app, blobs) = TestApp::new().await;
    let docs = app.create_folder(OwnerId::new(), "Docs", None).await;

    let response = app
        .upload(OwnerId::new(), Some(&docs), &[("a.txt", "a")])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(blobs.is_empty().await);
}

#[tokio::test]
async fn test_delete_file_twice() {
    let (app, blobs) = TestApp::new().await;
    let owner = OwnerId::new();
    let response = app.upload(owner, None, &[("a.txt", "a")]).await;
    let file_id = response.body["data"]["items"][0]["file"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/files/{file_id}/delete");

    let response = app.request("DELETE", &path, None, Some(owner)).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .request("POST", &path, Some(json!({ "confirm": true })), Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["files_deleted"], 1);
    assert!(blobs.is_empty().await);

    let response = app
        .request("POST", &path, Some(json!({ "confirm": true })), Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_delete_removes_blobs_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let app = TestApp::with_local_store(dir.path()).await;
    let owner = OwnerId::new();

    let docs = app.create_folder(owner, "Docs", None).await;
    let year = app.create_folder(owner, "2024", Some(&docs)).await;
    let response = app.upload(owner, Some(&year), &[("a.txt", "a")]).await;
    assert_eq!(response.body["data"]["stored"], 1);
    assert!(dir.path().join(format!("user_{owner}")).exists());

    let response = app
        .request(
            "POST",
            &format!("/api/folders/{docs}/delete"),
            Some(json!({ "confirm": true })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders_deleted"], 2);
    assert_eq!(response.body["data"]["files_deleted"], 1);
    assert!(!dir.path().join(format!("user_{owner}")).exists());

    let root = app.request("GET", "/api/folders", None, Some(owner)).await;
    assert_eq!(root.body["data"]["folders"], json!([]));
    assert_eq!(root.body["data"]["files"], json!([]));
}

//! Shared test helpers for integration tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use arbor_api::{AppState, build_app};
use arbor_core::config::AppConfig;
use arbor_core::traits::BlobStore;
use arbor_core::types::OwnerId;
use arbor_database::DatabasePool;
use arbor_storage::{LocalBlobStore, MemoryBlobStore};

const BOUNDARY: &str = "arbor-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a test application over an in-memory database and blob store.
    pub async fn new() -> (Self, MemoryBlobStore) {
        let blobs = MemoryBlobStore::new();
        let app = Self::with_store(Arc::new(blobs.clone())).await;
        (app, blobs)
    }

    /// Create a test application storing blobs beneath `root`.
    pub async fn with_local_store(root: &Path) -> Self {
        let store = LocalBlobStore::new(root)
            .await
            .expect("Failed to init local store");
        Self::with_store(Arc::new(store)).await
    }

    async fn with_store(blobs: Arc<dyn BlobStore>) -> Self {
        let db = DatabasePool::connect_in_memory()
            .await
            .expect("Failed to open test database");
        let state = AppState::new(AppConfig::default(), db, blobs);

        Self {
            router: build_app(state),
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        owner: Option<OwnerId>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(owner) = owner {
            req = req.header("X-Owner-Id", owner.to_string());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload files as `multipart/form-data`.
    pub async fn upload(
        &self,
        owner: OwnerId,
        folder_id: Option<&str>,
        files: &[(&str, &str)],
    ) -> TestResponse {
        let mut body = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("X-Owner-Id", owner.to_string())
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its id.
    pub async fn create_folder(&self, owner: OwnerId, name: &str, parent: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent })),
                Some(owner),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create folder failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No folder id in response")
            .to_string()
    }

    /// Send a prepared request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

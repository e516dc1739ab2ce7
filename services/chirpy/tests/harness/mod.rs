// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-process test harness for the Chirpy router.
//!
//! Builds the full router over a temporary static directory and an in-memory
//! (or deliberately failing) user store, and drives it with `oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chirpy::{
    config::Config,
    db::{MemoryUserStore, StoreError, UserStore},
    handlers::AppState,
    models::User,
    routes::router,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<html><body><h1>Welcome to Chirpy</h1></body></html>";

/// Response captured for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// A running router plus handles to its state.
pub struct TestApp {
    pub state: Arc<AppState>,
    router: Router,
    _static_dir: TempDir,
}

impl TestApp {
    /// Router over an in-memory store with the given platform.
    pub fn with_platform(platform: &str) -> (Self, Arc<MemoryUserStore>) {
        let users = Arc::new(MemoryUserStore::new());
        let app = Self::build(platform, users.clone());
        (app, users)
    }

    /// Router whose user store fails every call.
    pub fn with_failing_store(platform: &str) -> Self {
        Self::build(platform, Arc::new(FailingUserStore))
    }

    pub fn build(platform: &str, users: Arc<dyn UserStore>) -> Self {
        let static_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).expect("write index");
        std::fs::create_dir(static_dir.path().join("assets")).expect("create assets dir");
        std::fs::write(static_dir.path().join("assets").join("logo.txt"), "logo")
            .expect("write asset");

        let config = Config {
            platform: platform.to_string(),
            filepath_root: static_dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };
        let state = Arc::new(AppState::new(config, users).expect("build state"));

        Self {
            router: router(state.clone()),
            state,
            _static_dir: static_dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.into())
            .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, Body::empty()).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> TestResponse {
        self.request(Method::POST, uri, body.to_string()).await
    }
}

/// Store that fails every call, standing in for an unreachable database.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn create_user(&self, _email: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use hub_docs::config::DocsOptions;
use hub_docs::handlers::{app, DocsState};
use hub_docs::samples::sample_catalog;
use hub_docs::services::{HubCatalog, HubInspector};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Router over the built-in sample catalog with default options.
pub fn sample_app() -> Router {
    catalog_app(sample_catalog(), DocsOptions::default())
}

pub fn catalog_app(catalog: HubCatalog, options: DocsOptions) -> Router {
    let inspector = Arc::new(HubInspector::new(catalog.types()));
    app(DocsState::new(inspector, Arc::new(catalog), options), true)
}

pub async fn get(app: &Router, uri: &str) -> Result<TestResponse> {
    send(app, Request::get(uri).body(Body::empty())?).await
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;

    Ok(TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec())?,
    })
}

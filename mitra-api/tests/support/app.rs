//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mitra_agents::Coordinator;
use mitra_api::{create_api_router, ApiConfig, AppState};
use mitra_core::PlannerConfig;
use mitra_llm::IntentClassifier;
use mitra_storage::DocumentStore;
use mitra_test_utils::ScriptedClassifier;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Router over `store`, optionally with a scripted classifier.
pub fn app(store: Arc<dyn DocumentStore>, classifier: Option<ScriptedClassifier>) -> Router {
    app_with_config(store, classifier, &ApiConfig::default())
}

pub fn app_with_config(
    store: Arc<dyn DocumentStore>,
    classifier: Option<ScriptedClassifier>,
    config: &ApiConfig,
) -> Router {
    let coordinator = Coordinator::new(store, PlannerConfig::default());
    let classifier = classifier.map(|c| Arc::new(c) as Arc<dyn IntentClassifier>);
    create_api_router(AppState::new(coordinator, classifier), config)
}

/// A response reduced to its status and body.
///
/// Bodies that are not JSON come back as a JSON string.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResult<Reply> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    Ok(Reply { status, body })
}

pub async fn get(app: &Router, uri: &str) -> TestResult<Reply> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())?;
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> TestResult<Reply> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResult<Reply> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())?;
    send(app, request).await
}

//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the router in-process with a frozen clock so yearly
//! buckets are deterministic.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use host_reports::config::Config;
use host_reports::handlers;
use host_reports::models::BucketMode;
use host_reports::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Client whose clock reads 2024-07-01.
    pub fn new() -> Self {
        Self::with_config(Config {
            fixed_now: Some(at(2024, 7, 1)),
            ..Config::default()
        })
    }

    pub fn with_bucket_mode(bucket_mode: BucketMode) -> Self {
        Self::with_config(Config {
            fixed_now: Some(at(2024, 7, 1)),
            bucket_mode,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// POST a JSON body and return status and the parsed JSON response.
    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let parsed = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, parsed)
    }
}

//! HTTP fetch abstraction layer
//!
//! The ranking pipeline only ever needs "GET this locator and hand me parsed
//! JSON". `HttpFetcher` captures exactly that so the pipeline can run against
//! the real API through reqwest or against scripted pages in tests.

use crate::error::{ErrorCode, RankError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Fetch capability used by the page walker
///
/// Implementations must fail with a transport error on any non-success
/// status and with an unexpected-shape error when the body is not JSON.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get_json(&self, locator: &str) -> Result<Value>;
}

/// Production fetcher backed by a shared reqwest client
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// `None` leaves requests without a client-side timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            RankError::request_with_code(
                ErrorCode::TRANSPORT_CLIENT_BUILD,
                "<client>",
                "failed to create HTTP client",
            )
            .with_source(e)
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_json(&self, locator: &str) -> Result<Value> {
        debug!("GET {}", locator);

        let response = self.client.get(locator).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out"
            } else if e.is_connect() {
                "connection failed"
            } else {
                "request failed"
            };
            RankError::request(locator, message).with_source(e)
        })?;

        let status = response.status();
        trace!("GET {} -> {}", locator, status);
        if !status.is_success() {
            return Err(RankError::transport(locator, status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            RankError::unexpected_shape_with_code(
                ErrorCode::RESPONSE_NOT_JSON,
                locator,
                "response body is not valid JSON",
            )
            .with_source(e)
        })
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Status(u16),
}

/// Requests seen by a `MockFetcher`, in call order
pub type RecordedRequests = Arc<Mutex<Vec<String>>>;

/// Mock implementation of `HttpFetcher` for testing
///
/// Responses are keyed by exact locator and may be served any number of
/// times. Unknown locators answer 404.
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Track requested locators for verification
    pub requests: RecordedRequests,
}

impl MockFetcher {
    /// Create a new `MockFetcher` instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a raw JSON body for a locator
    pub async fn add_json(&self, locator: impl Into<String>, body: Value) {
        self.responses
            .lock()
            .await
            .insert(locator.into(), MockResponse::Json(body));
    }

    /// Serve one page in the upstream `{data, links: {next}}` shape
    pub async fn add_page<T: serde::Serialize>(
        &self,
        locator: impl Into<String>,
        items: &[T],
        next: Option<&str>,
    ) {
        let body = match next {
            Some(next) => json!({ "data": items, "links": { "next": next } }),
            None => json!({ "data": items, "links": {} }),
        };
        self.add_json(locator, body).await;
    }

    /// Answer a locator with a non-success status
    pub async fn add_status(&self, locator: impl Into<String>, status: u16) {
        self.responses
            .lock()
            .await
            .insert(locator.into(), MockResponse::Status(status));
    }

    /// Get the locators requested so far
    pub async fn requested(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    /// Number of times a locator was requested
    pub async fn request_count(&self, locator: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|seen| seen.as_str() == locator)
            .count()
    }
}

#[async_trait]
impl HttpFetcher for MockFetcher {
    async fn get_json(&self, locator: &str) -> Result<Value> {
        self.requests.lock().await.push(locator.to_string());

        match self.responses.lock().await.get(locator).cloned() {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(RankError::transport(locator, status)),
            None => Err(RankError::transport(locator, 404)),
        }
    }
}

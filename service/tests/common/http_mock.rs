//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to mock Congress.gov responses in integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/bill/117/house")
//!         .respond_with_json(json!({"bills": []}))
//!         .mount()
//!         .await;
//!
//!     // Point the client at server.url()
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(500)`, optionally `.with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stub server for outbound HTTP calls.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// The underlying wiremock server, for matchers this wrapper lacks.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Begin stubbing a `GET` of the given path.
    pub fn expect_get(&self, path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            path: path.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Assert every mounted stub saw its expected number of calls.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

/// Builder for one stubbed route.
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    path: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying this header value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Only match requests carrying this query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Respond 200 with a JSON body.
    #[must_use]
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.status = 200;
        self.body = Some(body);
        self
    }

    /// Respond with the given status and no body.
    #[must_use]
    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach a JSON body to whatever status is set.
    #[must_use]
    pub fn with_json_response(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Delay the response.
    #[must_use]
    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Expect exactly `times` matching requests.
    #[must_use]
    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    /// Register the stub with the server.
    pub async fn mount(self) {
        let mut response = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            response = response.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            response = response.set_delay(delay);
        }

        let mut builder = Mock::given(method("GET")).and(path(self.path.as_str()));
        for (name, value) in &self.headers {
            builder = builder.and(header(name.as_str(), value.as_str()));
        }
        for (name, value) in &self.query {
            builder = builder.and(query_param(name.as_str(), value.as_str()));
        }

        let mut mock = builder.respond_with(response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}

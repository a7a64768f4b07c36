//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Declarative HTTP stubs for the Congress.gov client
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//!
//! use common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_with_stub() {
//!     let server = MockHttpServer::start().await;
//!     server.expect_get("/bill/117/house").respond_with_json(json!({"bills": []})).mount().await;
//! }
//! ```

#![allow(dead_code)]

pub mod http_mock;

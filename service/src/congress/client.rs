//! Congress API client for fetching bill, action, vote and text documents.
//!
//! This module provides a trait-based HTTP client for the Congress.gov v3
//! API. Documents come back as decoded JSON; turning them into records is
//! the job of `lv_records::normalize`. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Swapping implementations (e.g., a different legislative data provider)
//!
//! # Example
//!
//! ```ignore
//! use legisview_api::congress::{Chamber, CongressApiClient, HttpCongressClient, Page};
//!
//! let client = HttpCongressClient::new("https://api.congress.gov/v3", "my-api-key");
//! let document = client
//!     .list_bills(117, &BillCollection::Chamber(Chamber::House), Page { limit: 25, offset: 0 })
//!     .await?;
//! let bills = lv_records::normalize::normalize_bills(&document);
//! ```

use async_trait::async_trait;
use lv_records::BillNumber;
use serde_json::Value;
use thiserror::Error;

use super::types::{BillCollection, Page};

/// Errors that can occur when calling the Congress API.
#[derive(Debug, Error)]
pub enum CongressApiError {
    /// HTTP request failed (transport, timeout or undecodable body)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

/// Trait for Congress API operations.
///
/// Every method returns the raw decoded document for its endpoint. Use
/// `HttpCongressClient` for real HTTP calls, or create a mock
/// implementation for testing.
#[async_trait]
pub trait CongressApiClient: Send + Sync {
    /// List one page of bills for a congress (`{"bills": [...]}`).
    async fn list_bills(
        &self,
        congress: u32,
        collection: &BillCollection,
        page: Page,
    ) -> Result<Value, CongressApiError>;

    /// Get a bill's detail document (`{"bill": {...}}`).
    async fn get_bill(&self, congress: u32, bill: &BillNumber) -> Result<Value, CongressApiError>;

    /// Get a bill's actions (`{"actions": [...]}`).
    async fn get_bill_actions(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError>;

    /// Get the recorded votes on a bill (`{"votes": [...]}`).
    async fn get_bill_votes(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError>;

    /// Get a bill's text versions (`{"textVersions": [...]}`).
    async fn get_bill_text(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError>;
}

/// HTTP-based implementation of `CongressApiClient`.
///
/// Makes real HTTP requests to the Congress.gov API.
pub struct HttpCongressClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCongressClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies, tests).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn bill_path(congress: u32, bill: &BillNumber) -> String {
        format!("/bill/{congress}/{}/{}", bill.bill_type(), bill.number())
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CongressApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "requesting congress api document");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .query(&[("format", "json")])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CongressApiError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CongressApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CongressApiClient for HttpCongressClient {
    async fn list_bills(
        &self,
        congress: u32,
        collection: &BillCollection,
        page: Page,
    ) -> Result<Value, CongressApiError> {
        let path = format!("/bill/{congress}/{}", collection.path_segment());
        self.get_json(
            &path,
            &[
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
            ],
        )
        .await
    }

    async fn get_bill(&self, congress: u32, bill: &BillNumber) -> Result<Value, CongressApiError> {
        self.get_json(&Self::bill_path(congress, bill), &[]).await
    }

    async fn get_bill_actions(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError> {
        let path = format!("{}/actions", Self::bill_path(congress, bill));
        self.get_json(&path, &[]).await
    }

    async fn get_bill_votes(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError> {
        let path = format!("{}/votes", Self::bill_path(congress, bill));
        self.get_json(&path, &[]).await
    }

    async fn get_bill_text(
        &self,
        congress: u32,
        bill: &BillNumber,
    ) -> Result<Value, CongressApiError> {
        let path = format!("{}/text", Self::bill_path(congress, bill));
        self.get_json(&path, &[]).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{BillCollection, BillNumber, CongressApiClient, CongressApiError, Page, Value};
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Slot = Mutex<Option<Result<Value, CongressApiError>>>;

    /// Mock implementation of `CongressApiClient` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods and verify
    /// calls with `calls()`. Each configured result is returned once;
    /// unconfigured list calls return an empty document and unconfigured
    /// bill calls return `NotFound`.
    pub struct MockCongressClient {
        list_bills_result: Slot,
        bill_result: Slot,
        actions_result: Slot,
        votes_result: Slot,
        text_result: Slot,
        calls: Mutex<Vec<String>>,
    }

    impl MockCongressClient {
        pub fn new() -> Self {
            Self {
                list_bills_result: Mutex::new(None),
                bill_result: Mutex::new(None),
                actions_result: Mutex::new(None),
                votes_result: Mutex::new(None),
                text_result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for `list_bills` calls.
        pub fn set_list_bills_result(&self, result: Result<Value, CongressApiError>) {
            *self.list_bills_result.lock().unwrap() = Some(result);
        }

        /// Set the result for `get_bill` calls.
        pub fn set_bill_result(&self, result: Result<Value, CongressApiError>) {
            *self.bill_result.lock().unwrap() = Some(result);
        }

        /// Set the result for `get_bill_actions` calls.
        pub fn set_actions_result(&self, result: Result<Value, CongressApiError>) {
            *self.actions_result.lock().unwrap() = Some(result);
        }

        /// Set the result for `get_bill_votes` calls.
        pub fn set_votes_result(&self, result: Result<Value, CongressApiError>) {
            *self.votes_result.lock().unwrap() = Some(result);
        }

        /// Set the result for `get_bill_text` calls.
        pub fn set_text_result(&self, result: Result<Value, CongressApiError>) {
            *self.text_result.lock().unwrap() = Some(result);
        }

        /// Get every request made, as `"<endpoint> <path>"` strings.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn take(slot: &Slot, path: String) -> Result<Value, CongressApiError> {
            slot.lock()
                .unwrap()
                .take()
                .unwrap_or(Err(CongressApiError::NotFound(path)))
        }
    }

    impl Default for MockCongressClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CongressApiClient for MockCongressClient {
        async fn list_bills(
            &self,
            congress: u32,
            collection: &BillCollection,
            page: Page,
        ) -> Result<Value, CongressApiError> {
            self.record(format!(
                "list_bills /bill/{congress}/{}?limit={}&offset={}",
                collection.path_segment(),
                page.limit,
                page.offset
            ));

            self.list_bills_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(serde_json::json!({ "bills": [] })))
        }

        async fn get_bill(
            &self,
            congress: u32,
            bill: &BillNumber,
        ) -> Result<Value, CongressApiError> {
            let path = format!("/bill/{congress}/{}/{}", bill.bill_type(), bill.number());
            self.record(format!("get_bill {path}"));
            Self::take(&self.bill_result, path)
        }

        async fn get_bill_actions(
            &self,
            congress: u32,
            bill: &BillNumber,
        ) -> Result<Value, CongressApiError> {
            let path = format!("/bill/{congress}/{}/{}/actions", bill.bill_type(), bill.number());
            self.record(format!("get_bill_actions {path}"));
            Self::take(&self.actions_result, path)
        }

        async fn get_bill_votes(
            &self,
            congress: u32,
            bill: &BillNumber,
        ) -> Result<Value, CongressApiError> {
            let path = format!("/bill/{congress}/{}/{}/votes", bill.bill_type(), bill.number());
            self.record(format!("get_bill_votes {path}"));
            Self::take(&self.votes_result, path)
        }

        async fn get_bill_text(
            &self,
            congress: u32,
            bill: &BillNumber,
        ) -> Result<Value, CongressApiError> {
            let path = format!("/bill/{congress}/{}/{}/text", bill.bill_type(), bill.number());
            self.record(format!("get_bill_text {path}"));
            Self::take(&self.text_result, path)
        }
    }
}

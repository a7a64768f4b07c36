//! Access to the Congress.gov v3 API.
//!
//! Every call returns the decoded JSON document untouched; turning it into
//! records is left to `lv_records::normalize`, and deciding what a failure
//! means is left to [`crate::dashboard`].
//!
//! [`CongressApiClient`] is the seam. [`HttpCongressClient`] talks to the
//! real service with the configured key and timeout. With the `test-utils`
//! feature, `mock::MockCongressClient` replays one canned document per
//! endpoint and records the request paths it was asked for, which is what
//! the dashboard and router unit tests run against.
//!
//! The HTTP client itself is covered in `tests/congress_client_tests.rs`
//! against a local wiremock server that checks the `X-API-Key` header and
//! the `limit`/`offset`/`format` query parameters:
//!
//! ```ignore
//! server
//!     .expect_get("/bill/117/house")
//!     .with_query("offset", "50")
//!     .respond_with_json(json!({ "bills": [] }))
//!     .mount()
//!     .await;
//! ```

mod client;
mod types;

pub use client::{CongressApiClient, CongressApiError, HttpCongressClient};
pub use types::{BillCollection, Chamber, ChamberParseError, Page};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;

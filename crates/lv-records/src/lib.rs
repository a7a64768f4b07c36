//! Normalized legislative records for Legisview.
//!
//! This crate turns loosely-shaped Congress.gov documents into flat, typed
//! records and classifies roll-call votes by how partisan they were. It does
//! no I/O: the service crate fetches the documents and hands them in.
//!
//! - [`normalize`] - bills, actions, votes, text versions and subjects
//! - [`BillNumber`] - `HR1234` split into `("hr", "1234")` for detail lookups
//! - [`classify`](classify::classify) - yea percentages, category and decisive party
//! - [`listing`] - list filters, ordering and overview figures
//!
//! ```
//! use lv_records::{classify::classify, normalize::normalize_votes, Category};
//! use serde_json::json;
//!
//! let votes = normalize_votes(&json!({
//!     "votes": [{
//!         "result": "Passed",
//!         "democratic": {"yea": 180, "no": 20},
//!         "republican": {"yea": 10, "no": 190}
//!     }]
//! }));
//! let result = classify(&votes[0]);
//! assert_eq!(result.category, Category::Partisan);
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod classify;
pub mod listing;
pub mod normalize;

mod bill_number;
mod party;
mod records;
mod wire;

pub use bill_number::{BillNumber, BillNumberError};
pub use classify::{Category, DecisiveParty, PartisanshipResult, PartisanshipThresholds};
pub use listing::{BillFilter, BillStatus, BillTypeFilter, FilterParseError, Overview};
pub use party::Party;
pub use records::{
    Action, Bill, LatestAction, PartyBreakdown, PartyTally, Subject, TextVersion, VoteTally,
    VoteTotals,
};
pub use wire::parse_date;

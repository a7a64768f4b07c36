//! Turn decoded upstream documents into normalized records.
//!
//! Each entry is decoded on its own, so one malformed entry never costs the
//! rest of the batch. Entries that are not JSON objects are skipped and
//! logged; everything else yields a record with defaults for whatever was
//! missing.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::records::{Action, Bill, Subject, TextVersion, VoteTally};
use crate::wire::{RawAction, RawBill, RawSubject, RawTextVersion, RawVote};

/// Normalize a single raw bill entry.
///
/// Returns `None` only when the entry is not a JSON object.
#[must_use]
pub fn normalize_bill(entry: &Value) -> Option<Bill> {
    decode_entry::<RawBill>(entry, "bill").map(Bill::from)
}

/// Normalize the `bills` list of a bill-list document.
#[must_use]
pub fn normalize_bills(document: &Value) -> Vec<Bill> {
    normalize_list::<RawBill, Bill>(document, "bills", "bill")
}

/// Normalize the `actions` list of an actions document.
#[must_use]
pub fn normalize_actions(document: &Value) -> Vec<Action> {
    normalize_list::<RawAction, Action>(document, "actions", "action")
}

/// Normalize the `votes` list of a votes document.
#[must_use]
pub fn normalize_votes(document: &Value) -> Vec<VoteTally> {
    normalize_list::<RawVote, VoteTally>(document, "votes", "vote")
}

/// Normalize the `textVersions` list of a text document.
#[must_use]
pub fn normalize_text_versions(document: &Value) -> Vec<TextVersion> {
    normalize_list::<RawTextVersion, TextVersion>(document, "textVersions", "text version")
}

/// Normalize `bill.subjects.legislativeSubjects` of a bill-detail document.
///
/// Subjects without a name are dropped.
#[must_use]
pub fn normalize_subjects(document: &Value) -> Vec<Subject> {
    let subjects = document
        .get("bill")
        .and_then(|bill| bill.get("subjects"))
        .and_then(|subjects| subjects.get("legislativeSubjects"));

    entries(subjects, "legislativeSubjects")
        .iter()
        .filter_map(|entry| decode_entry::<RawSubject>(entry, "subject"))
        .map(Subject::from)
        .filter(|subject| !subject.name.is_empty())
        .collect()
}

fn normalize_list<R, T>(document: &Value, key: &str, kind: &str) -> Vec<T>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let normalized: Vec<T> = entries(document.get(key), key)
        .iter()
        .filter_map(|entry| decode_entry::<R>(entry, kind))
        .map(T::from)
        .collect();

    tracing::debug!(kind, count = normalized.len(), "normalized upstream entries");
    normalized
}

fn entries<'a>(list: Option<&'a Value>, key: &str) -> &'a [Value] {
    match list {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => &[],
        Some(_) => {
            tracing::warn!(key, "expected a list in upstream document; treating as empty");
            &[]
        }
    }
}

fn decode_entry<R: DeserializeOwned>(entry: &Value, kind: &str) -> Option<R> {
    if !entry.is_object() {
        tracing::warn!(kind, "skipping upstream entry that is not an object");
        return None;
    }
    match R::deserialize(entry) {
        Ok(raw) => Some(raw),
        Err(err) => {
            tracing::warn!(kind, error = %err, "skipping undecodable upstream entry");
            None
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Normalization is a pure function of its input
        #[test]
        fn normalize_is_deterministic(
            number in "[A-Z]{0,3}[0-9]{0,4}",
            title in ".{0,20}",
            count in 0u32..1000,
            party in prop::sample::select(vec!["D", "R", "I", "X", ""]),
        ) {
            let document = json!({
                "bills": [{
                    "number": number,
                    "title": title,
                    "sponsors": [{"name": "Someone", "party": party}],
                    "cosponsors": {"count": count}
                }]
            });
            prop_assert_eq!(normalize_bills(&document), normalize_bills(&document));
        }

        /// Every object entry yields exactly one record
        #[test]
        fn one_record_per_object_entry(n in 0usize..20) {
            let entries: Vec<Value> = (0..n).map(|i| json!({"number": format!("HR{i}")})).collect();
            let document = json!({"bills": entries});
            prop_assert_eq!(normalize_bills(&document).len(), n);
        }
    }
}

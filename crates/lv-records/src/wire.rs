//! Raw upstream shapes and the lenient field decoders behind them.
//!
//! Every field is optional on the wire. A missing key, an explicit `null`
//! and a value of the wrong JSON type all decode to the field's default, so
//! decoding an object into one of these structs does not fail.

use chrono::{DateTime, NaiveDate};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decode text; numbers are rendered, anything else is empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Decode a non-negative count from a number or a numeric string.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or(0))
}

/// Like [`count`] but keeps absence distinguishable.
pub(crate) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_date))
}

/// Parse the date formats the upstream source emits.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Decode a nested value, falling back to its default when the shape is wrong.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list, keeping only the elements that decode.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode a list element by element, keeping positions.
///
/// An element that does not decode becomes its default in place.
pub(crate) fn positional_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBill {
    #[serde(default, deserialize_with = "text")]
    pub number: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "count")]
    pub congress: u32,
    #[serde(default, deserialize_with = "date")]
    pub introduced_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "or_default")]
    pub latest_action: RawLatestAction,
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub bill_type: String,
    #[serde(default, deserialize_with = "text")]
    pub url: String,
    #[serde(default, deserialize_with = "text")]
    pub origin_chamber: String,
    #[serde(default, deserialize_with = "positional_vec")]
    pub sponsors: Vec<RawSponsor>,
    #[serde(default, deserialize_with = "or_default")]
    pub cosponsors: RawCosponsors,
    #[serde(default, deserialize_with = "or_default")]
    pub subjects: RawSubjects,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLatestAction {
    #[serde(default, deserialize_with = "date")]
    pub action_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "text")]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSponsor {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub party: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCosponsors {
    #[serde(default, deserialize_with = "count")]
    pub count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSubjects {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub legislative_subjects: Vec<RawSubject>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSubject {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAction {
    #[serde(default, deserialize_with = "date")]
    pub action_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "text")]
    pub text: String,
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub action_type: String,
    #[serde(default, deserialize_with = "text")]
    pub action_chamber: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawVote {
    #[serde(default, deserialize_with = "date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "text")]
    pub question: String,
    #[serde(default, deserialize_with = "text")]
    pub result: String,
    #[serde(default, deserialize_with = "text")]
    pub chamber: String,
    #[serde(default, deserialize_with = "optional_count")]
    pub roll_number: Option<u32>,
    #[serde(default, deserialize_with = "or_default")]
    pub total: RawTotals,
    #[serde(default, deserialize_with = "or_default")]
    pub democratic: RawPartyCounts,
    #[serde(default, deserialize_with = "or_default")]
    pub republican: RawPartyCounts,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTotals {
    #[serde(default, deserialize_with = "count")]
    pub yea: u32,
    #[serde(default, deserialize_with = "count")]
    pub no: u32,
    #[serde(default, deserialize_with = "count")]
    pub present: u32,
    #[serde(default, deserialize_with = "count")]
    pub not_voting: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPartyCounts {
    #[serde(default, deserialize_with = "count")]
    pub yea: u32,
    #[serde(default, deserialize_with = "count")]
    pub no: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawTextVersion {
    #[serde(default, deserialize_with = "date")]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub version_type: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub formats: Vec<RawFormat>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFormat {
    #[serde(default, deserialize_with = "text")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_date_accepts_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2022, 3, 1);
        assert_eq!(parse_date("2022-03-01"), expected);
        assert_eq!(parse_date("2022-03-01T17:32:00-05:00"), expected);
        assert_eq!(parse_date("2022-03-01T04:00:00Z"), expected);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("March 1, 2022"), None);
        assert_eq!(parse_date("2022-13-01"), None);
    }

    #[test]
    fn counts_accept_numbers_and_numeric_strings() {
        let totals: RawTotals = serde_json::from_value(json!({
            "yea": 218,
            "no": "210",
            "present": 1.0,
            "notVoting": "n/a"
        }))
        .unwrap();
        assert_eq!(totals.yea, 218);
        assert_eq!(totals.no, 210);
        assert_eq!(totals.present, 1);
        assert_eq!(totals.not_voting, 0);
    }

    #[test]
    fn negative_and_fractional_counts_default_to_zero() {
        let counts: RawPartyCounts =
            serde_json::from_value(json!({"yea": -3, "no": 2.5})).unwrap();
        assert_eq!(counts.yea, 0);
        assert_eq!(counts.no, 0);
    }

    #[test]
    fn wrongly_shaped_nested_objects_fall_back_to_default() {
        let bill: RawBill = serde_json::from_value(json!({
            "number": 42,
            "latestAction": "yesterday",
            "cosponsors": [1, 2, 3],
            "sponsors": {"name": "not a list"}
        }))
        .unwrap();
        assert_eq!(bill.number, "42");
        assert_eq!(bill.latest_action.text, "");
        assert_eq!(bill.cosponsors.count, 0);
        assert!(bill.sponsors.is_empty());
    }

    #[test]
    fn null_fields_decode_to_defaults() {
        let vote: RawVote = serde_json::from_value(json!({
            "question": null,
            "rollNumber": null,
            "total": null
        }))
        .unwrap();
        assert_eq!(vote.question, "");
        assert_eq!(vote.roll_number, None);
        assert_eq!(vote.total.yea, 0);
    }

    #[test]
    fn lenient_vec_drops_elements_that_are_not_objects() {
        let subjects: RawSubjects = serde_json::from_value(json!({
            "legislativeSubjects": ["stray", {"name": "Postal service"}]
        }))
        .unwrap();
        assert_eq!(subjects.legislative_subjects.len(), 1);
        assert_eq!(subjects.legislative_subjects[0].name, "Postal service");
    }

    #[test]
    fn sponsors_keep_their_position_when_an_entry_is_malformed() {
        let bill: RawBill = serde_json::from_value(json!({
            "sponsors": [null, "stray", {"name": "Jane Doe", "party": "D"}]
        }))
        .unwrap();
        assert_eq!(bill.sponsors.len(), 3);
        assert_eq!(bill.sponsors[0].party, "");
        assert_eq!(bill.sponsors[1].name, "");
        assert_eq!(bill.sponsors[2].name, "Jane Doe");
    }
}

//! Filtering, ordering and summary figures over normalized bill lists.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::party::Party;
use crate::records::{Action, Bill, VoteTally};

/// Legislative stage inferred from the text of a bill's latest action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Introduced,
    PassedHouse,
    PassedSenate,
    BecameLaw,
    Failed,
}

/// Error for an unrecognized status, bill type or party filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} filter '{value}'")]
pub struct FilterParseError {
    kind: &'static str,
    value: String,
}

impl FromStr for BillStatus {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "introduced" => Ok(Self::Introduced),
            "passed_house" => Ok(Self::PassedHouse),
            "passed_senate" => Ok(Self::PassedSenate),
            "became_law" => Ok(Self::BecameLaw),
            "failed" => Ok(Self::Failed),
            _ => Err(FilterParseError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl BillStatus {
    /// Whether a latest-action text indicates this status.
    #[must_use]
    pub fn matches(self, latest_action_text: &str) -> bool {
        let text = latest_action_text.to_lowercase();
        match self {
            Self::Introduced => text.contains("introduced") || text.contains("read twice"),
            Self::PassedHouse => passed_then(&text, "house"),
            Self::PassedSenate => passed_then(&text, "senate"),
            Self::BecameLaw => {
                text.contains("became public law") || text.contains("signed by president")
            }
            Self::Failed => text.contains("failed") || text.contains("vetoed"),
        }
    }
}

/// "passed" followed anywhere later by `chamber`.
fn passed_then(text: &str, chamber: &str) -> bool {
    text.match_indices("passed")
        .any(|(at, word)| text[at + word.len()..].contains(chamber))
}

/// Bill types offered as list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillTypeFilter {
    Hr,
    S,
    Hjres,
    Sjres,
}

impl BillTypeFilter {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::S => "s",
            Self::Hjres => "hjres",
            Self::Sjres => "sjres",
        }
    }

    /// Whether the bill number contains this type code, ignoring case.
    ///
    /// This is a substring test, so `s` also keeps `SJRES` numbers.
    #[must_use]
    pub fn matches(self, bill_number: &str) -> bool {
        bill_number.to_ascii_lowercase().contains(self.code())
    }
}

impl FromStr for BillTypeFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Self::Hr),
            "s" => Ok(Self::S),
            "hjres" => Ok(Self::Hjres),
            "sjres" => Ok(Self::Sjres),
            _ => Err(FilterParseError {
                kind: "bill type",
                value: s.to_string(),
            }),
        }
    }
}

/// Parse a sponsor-party filter; only D and R are offered.
///
/// # Errors
/// Returns [`FilterParseError`] for anything other than a Democratic or
/// Republican code.
pub fn parse_party_filter(raw: &str) -> Result<Party, FilterParseError> {
    match Party::from_code(raw) {
        party @ (Party::D | Party::R) => Ok(party),
        _ => Err(FilterParseError {
            kind: "party",
            value: raw.to_string(),
        }),
    }
}

/// Conjunction of the optional list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillFilter {
    pub bill_type: Option<BillTypeFilter>,
    pub party: Option<Party>,
    pub status: Option<BillStatus>,
}

impl BillFilter {
    #[must_use]
    pub fn matches(&self, bill: &Bill) -> bool {
        self.bill_type.is_none_or(|t| t.matches(&bill.bill_number))
            && self.party.is_none_or(|p| bill.sponsor_party == p)
            && self
                .status
                .is_none_or(|s| s.matches(&bill.latest_action.text))
    }

    /// Keep matching bills and order them newest-introduced first.
    #[must_use]
    pub fn apply(&self, bills: Vec<Bill>) -> Vec<Bill> {
        let mut kept: Vec<Bill> = bills.into_iter().filter(|b| self.matches(b)).collect();
        sort_newest_first(&mut kept);
        kept
    }
}

/// Dated items ascending, undated items last.
fn dated_ascending<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dated items descending, undated items last.
fn dated_descending<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        _ => dated_ascending(a, b),
    }
}

/// Sort bills by introduced date, newest first; stable for ties.
pub fn sort_newest_first(bills: &mut [Bill]) {
    bills.sort_by(|a, b| dated_descending(a.introduced_date.as_ref(), b.introduced_date.as_ref()));
}

/// Sort actions into a timeline, oldest first.
pub fn sort_timeline(actions: &mut [Action]) {
    actions.sort_by(|a, b| dated_ascending(a.date.as_ref(), b.date.as_ref()));
}

/// Sort votes newest first.
pub fn sort_votes_newest_first(votes: &mut [VoteTally]) {
    votes.sort_by(|a, b| dated_descending(a.date.as_ref(), b.date.as_ref()));
}

/// Headline figures for a bill list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_bills: usize,
    pub dem_sponsored: usize,
    pub rep_sponsored: usize,
    pub dem_sponsored_pct: f64,
    pub rep_sponsored_pct: f64,
    pub avg_cosponsors: f64,
    /// Party sponsoring more bills, `None` on a tie.
    pub leading_party: Option<Party>,
}

impl Overview {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_bills(bills: &[Bill]) -> Self {
        let total_bills = bills.len();
        let sponsored_by = |party: Party| bills.iter().filter(|b| b.sponsor_party == party).count();
        let dem_sponsored = sponsored_by(Party::D);
        let rep_sponsored = sponsored_by(Party::R);

        let share = |count: usize| {
            if total_bills == 0 {
                0.0
            } else {
                count as f64 / total_bills as f64 * 100.0
            }
        };
        let cosponsors: u64 = bills.iter().map(|b| u64::from(b.cosponsors_count)).sum();

        Self {
            total_bills,
            dem_sponsored,
            rep_sponsored,
            dem_sponsored_pct: share(dem_sponsored),
            rep_sponsored_pct: share(rep_sponsored),
            avg_cosponsors: if total_bills == 0 {
                0.0
            } else {
                cosponsors as f64 / total_bills as f64
            },
            leading_party: match dem_sponsored.cmp(&rep_sponsored) {
                Ordering::Greater => Some(Party::D),
                Ordering::Less => Some(Party::R),
                Ordering::Equal => None,
            },
        }
    }
}

/// Human label for a congress number, e.g. "117th Congress (2021-2023)".
#[must_use]
pub fn congress_label(congress: u32) -> String {
    let start = 1789 + 2 * (i64::from(congress) - 1);
    format!("{}{} Congress ({start}-{})", congress, ordinal_suffix(congress), start + 2)
}

const fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::LatestAction;
    use chrono::NaiveDate;

    fn bill(number: &str, party: Party, action: &str, introduced: Option<(i32, u32, u32)>) -> Bill {
        Bill {
            bill_number: number.to_string(),
            title: format!("Title of {number}"),
            congress: 117,
            introduced_date: introduced.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            latest_action: LatestAction {
                date: None,
                text: action.to_string(),
            },
            bill_type: String::new(),
            sponsors: Vec::new(),
            sponsor_party: party,
            cosponsors_count: 0,
            url: String::new(),
            origin_chamber: String::new(),
        }
    }

    #[test]
    fn status_patterns() {
        assert!(BillStatus::Introduced.matches("Introduced in House"));
        assert!(BillStatus::Introduced.matches("Read twice and referred to the Committee on Finance."));
        assert!(BillStatus::PassedHouse.matches("Passed/agreed to in House: On passage Passed"));
        assert!(BillStatus::PassedHouse.matches("PASSED HOUSE"));
        assert!(!BillStatus::PassedHouse.matches("House Committee passed nothing"));
        assert!(BillStatus::PassedSenate.matches("Passed Senate without amendment by Unanimous Consent."));
        assert!(BillStatus::BecameLaw.matches("Became Public Law No: 117-108."));
        assert!(BillStatus::BecameLaw.matches("Signed by President."));
        assert!(BillStatus::Failed.matches("Failed of passage in Senate"));
        assert!(BillStatus::Failed.matches("Vetoed by President."));
        assert!(!BillStatus::Failed.matches("Referred to committee"));
    }

    #[test]
    fn status_parses_common_spellings() {
        assert_eq!("passed-house".parse::<BillStatus>(), Ok(BillStatus::PassedHouse));
        assert_eq!("Became Law".parse::<BillStatus>(), Ok(BillStatus::BecameLaw));
        assert!("vetoed".parse::<BillStatus>().is_err());
    }

    #[test]
    fn bill_type_filter_is_a_substring_match() {
        assert!(BillTypeFilter::Hr.matches("HR1234"));
        assert!(BillTypeFilter::S.matches("SJRES5"));
        assert!(BillTypeFilter::Hjres.matches("hjres3"));
        assert!(!BillTypeFilter::Sjres.matches("HR1"));
    }

    #[test]
    fn party_filter_only_accepts_major_parties() {
        assert_eq!(parse_party_filter("D"), Ok(Party::D));
        assert_eq!(parse_party_filter("republican"), Ok(Party::R));
        assert!(parse_party_filter("I").is_err());
        assert!(parse_party_filter("").is_err());
    }

    #[test]
    fn filter_combines_conditions_and_sorts() {
        let bills = vec![
            bill("HR1", Party::D, "Introduced in House", Some((2021, 1, 4))),
            bill("S2", Party::D, "Introduced in Senate", Some((2021, 3, 1))),
            bill("HR3", Party::R, "Introduced in House", Some((2021, 2, 1))),
            bill("HR4", Party::D, "Became Public Law No: 117-1.", Some((2021, 5, 1))),
            bill("HR5", Party::D, "Introduced in House", None),
            bill("HR6", Party::D, "Introduced in House", Some((2021, 6, 1))),
        ];
        let filter = BillFilter {
            bill_type: Some(BillTypeFilter::Hr),
            party: Some(Party::D),
            status: Some(BillStatus::Introduced),
        };

        let kept = filter.apply(bills);
        let numbers: Vec<&str> = kept.iter().map(|b| b.bill_number.as_str()).collect();
        assert_eq!(numbers, ["HR6", "HR1", "HR5"]);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let bills = vec![
            bill("HR1", Party::Unknown, "", None),
            bill("S1", Party::I, "", None),
        ];
        assert_eq!(BillFilter::default().apply(bills).len(), 2);
    }

    #[test]
    fn timeline_orders_oldest_first_with_undated_last() {
        let action = |date: Option<(i32, u32, u32)>, text: &str| Action {
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            text: text.to_string(),
            action_type: String::new(),
            chamber: String::new(),
            is_vote: false,
        };
        let mut actions = vec![
            action(None, "undated"),
            action(Some((2022, 2, 8)), "second"),
            action(Some((2021, 5, 11)), "first"),
        ];
        sort_timeline(&mut actions);
        let texts: Vec<&str> = actions.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "undated"]);
    }

    #[test]
    fn overview_counts_and_shares() {
        let mut bills = vec![
            bill("HR1", Party::D, "", None),
            bill("HR2", Party::D, "", None),
            bill("HR3", Party::R, "", None),
            bill("HR4", Party::Unknown, "", None),
        ];
        bills[0].cosponsors_count = 10;
        bills[2].cosponsors_count = 3;

        let overview = Overview::from_bills(&bills);
        assert_eq!(overview.total_bills, 4);
        assert_eq!(overview.dem_sponsored, 2);
        assert_eq!(overview.rep_sponsored, 1);
        assert!((overview.dem_sponsored_pct - 50.0).abs() < 1e-9);
        assert!((overview.rep_sponsored_pct - 25.0).abs() < 1e-9);
        assert!((overview.avg_cosponsors - 3.25).abs() < 1e-9);
        assert_eq!(overview.leading_party, Some(Party::D));
    }

    #[test]
    fn overview_of_empty_list_is_zeroed() {
        let overview = Overview::from_bills(&[]);
        assert_eq!(overview.total_bills, 0);
        assert!(overview.dem_sponsored_pct.abs() < f64::EPSILON);
        assert!(overview.avg_cosponsors.abs() < f64::EPSILON);
        assert_eq!(overview.leading_party, None);
    }

    #[test]
    fn congress_labels() {
        assert_eq!(congress_label(117), "117th Congress (2021-2023)");
        assert_eq!(congress_label(116), "116th Congress (2019-2021)");
        assert_eq!(congress_label(1), "1st Congress (1789-1791)");
        assert_eq!(congress_label(112), "112th Congress (2011-2013)");
        assert_eq!(congress_label(102), "102nd Congress (1991-1993)");
        assert_eq!(congress_label(103), "103rd Congress (1993-1995)");
    }
}

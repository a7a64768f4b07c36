//! Normalized bill, action, vote, text and subject records.
//!
//! These are the stable contract between the fetch layer and whatever
//! presents the data. They are plain values: built once per fetch and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bill_number::{BillNumber, BillNumberError};
use crate::party::Party;
use crate::wire::{RawAction, RawBill, RawSubject, RawTextVersion, RawVote};

/// A piece of proposed legislation as listed by the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Display number such as `HR1234`.
    pub bill_number: String,
    pub title: String,
    /// Congress number, 0 when the source omits it.
    pub congress: u32,
    pub introduced_date: Option<NaiveDate>,
    pub latest_action: LatestAction,
    /// Lowercase type tag (`hr`, `s`, `hjres`), empty when unknown.
    pub bill_type: String,
    pub sponsors: Vec<String>,
    /// Party of the first listed sponsor only.
    pub sponsor_party: Party,
    pub cosponsors_count: u32,
    pub url: String,
    pub origin_chamber: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestAction {
    pub date: Option<NaiveDate>,
    pub text: String,
}

impl Bill {
    /// Split the bill number for detail lookups.
    ///
    /// # Errors
    /// Returns [`BillNumberError`] when `bill_number` is not `letters+digits`.
    pub fn resolve(&self) -> Result<BillNumber, BillNumberError> {
        BillNumber::parse(&self.bill_number)
    }
}

impl From<RawBill> for Bill {
    fn from(raw: RawBill) -> Self {
        let bill_number = compose_bill_number(&raw.number, &raw.bill_type);
        let bill_type = if raw.bill_type.trim().is_empty() {
            BillNumber::parse(&bill_number)
                .map(|parsed| parsed.bill_type().to_string())
                .unwrap_or_default()
        } else {
            raw.bill_type.trim().to_ascii_lowercase()
        };

        // Single-sponsor heuristic: the first sponsor decides the party.
        let sponsor_party = raw
            .sponsors
            .first()
            .map_or(Party::Unknown, |sponsor| Party::from_code(&sponsor.party));
        let sponsors = raw.sponsors.into_iter().map(|s| s.name).collect();

        Self {
            bill_number,
            title: raw.title,
            congress: raw.congress,
            introduced_date: raw.introduced_date,
            latest_action: LatestAction {
                date: raw.latest_action.action_date,
                text: raw.latest_action.text,
            },
            bill_type,
            sponsors,
            sponsor_party,
            cosponsors_count: raw.cosponsors.count,
            url: raw.url,
            origin_chamber: raw.origin_chamber,
        }
    }
}

/// Build the display bill number from the raw `number` and `type` fields.
///
/// The live API sends `"number": "3076", "type": "HR"`; older payloads send
/// the combined `"HR3076"`. Whitespace inside the number is dropped.
fn compose_bill_number(number: &str, bill_type: &str) -> String {
    let number: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    let bill_type = bill_type.trim();
    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) && !bill_type.is_empty() {
        format!("{}{number}", bill_type.to_ascii_uppercase())
    } else {
        number
    }
}

/// One step in a bill's legislative history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub date: Option<NaiveDate>,
    pub text: String,
    pub action_type: String,
    pub chamber: String,
    pub is_vote: bool,
}

impl From<RawAction> for Action {
    fn from(raw: RawAction) -> Self {
        let is_vote = raw.action_type.to_lowercase().contains("vote");
        Self {
            date: raw.action_date,
            text: raw.text,
            action_type: raw.action_type,
            chamber: raw.action_chamber,
            is_vote,
        }
    }
}

/// Chamber-wide totals of a roll-call vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTotals {
    pub yea: u32,
    pub nay: u32,
    pub present: u32,
    pub not_voting: u32,
}

/// Yea/nay counts for one party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTally {
    pub yea: u32,
    pub nay: u32,
}

impl PartyTally {
    /// Votes that count toward the yea percentage.
    #[must_use]
    pub const fn cast(self) -> u64 {
        self.yea as u64 + self.nay as u64
    }
}

/// Democratic and Republican breakdown. Other parties are not reported upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBreakdown {
    pub democratic: PartyTally,
    pub republican: PartyTally,
}

impl PartyBreakdown {
    /// Whether the source reported any party-level votes at all.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        self.democratic.cast() > 0 || self.republican.cast() > 0
    }
}

/// A recorded vote on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub date: Option<NaiveDate>,
    pub question: String,
    pub result: String,
    pub chamber: String,
    pub roll_number: Option<u32>,
    pub totals: VoteTotals,
    pub party_breakdown: PartyBreakdown,
}

impl VoteTally {
    /// Whether `result` reports passage ("Passed", "Agreed to", any case).
    #[must_use]
    pub fn passed(&self) -> bool {
        let result = self.result.to_lowercase();
        result.contains("passed") || result.contains("agreed to")
    }
}

impl From<RawVote> for VoteTally {
    fn from(raw: RawVote) -> Self {
        Self {
            date: raw.date,
            question: raw.question,
            result: raw.result,
            chamber: raw.chamber,
            roll_number: raw.roll_number,
            totals: VoteTotals {
                yea: raw.total.yea,
                nay: raw.total.no,
                present: raw.total.present,
                not_voting: raw.total.not_voting,
            },
            party_breakdown: PartyBreakdown {
                democratic: PartyTally {
                    yea: raw.democratic.yea,
                    nay: raw.democratic.no,
                },
                republican: PartyTally {
                    yea: raw.republican.yea,
                    nay: raw.republican.no,
                },
            },
        }
    }
}

/// A published text version of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVersion {
    pub date: Option<NaiveDate>,
    pub version_type: String,
    /// URL of the first listed format, empty when none.
    pub url: String,
}

impl From<RawTextVersion> for TextVersion {
    fn from(raw: RawTextVersion) -> Self {
        Self {
            date: raw.date,
            version_type: raw.version_type,
            url: raw
                .formats
                .into_iter()
                .next()
                .map(|format| format.url)
                .unwrap_or_default(),
        }
    }
}

/// A legislative subject term attached to a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
}

impl From<RawSubject> for Subject {
    fn from(raw: RawSubject) -> Self {
        Self { name: raw.name }
    }
}

//! Fetch, normalize and analyze legislative data for presentation.
//!
//! This is where upstream failures stop. A failed bill-list fetch is
//! reported to the caller as [`UpstreamUnavailable`]; failed detail, action,
//! vote and text fetches are logged and replaced with empty sections so a
//! bill page always renders.

use std::future::Future;
use std::sync::Arc;

use lv_records::{
    classify::classify_with,
    listing::{congress_label, sort_timeline, sort_votes_newest_first},
    normalize::{
        normalize_actions, normalize_bills, normalize_subjects, normalize_text_versions,
        normalize_votes,
    },
    Action, Bill, BillFilter, BillNumber, BillTypeFilter, Overview, PartisanshipResult,
    PartisanshipThresholds, Party, Subject, TextVersion, VoteTally,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::congress::{BillCollection, Chamber, CongressApiClient, CongressApiError, Page};

/// The bill list could not be fetched.
#[derive(Debug, thiserror::Error)]
#[error("legislative data source unavailable: {0}")]
pub struct UpstreamUnavailable(#[from] pub CongressApiError);

/// Parameters of a bill list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillQuery {
    pub congress: u32,
    pub chamber: Chamber,
    pub filter: BillFilter,
    /// Page size; the dashboard default when `None`.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// A filtered, ordered page of bills with its headline figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPage {
    pub congress: u32,
    pub congress_label: String,
    pub chamber: Chamber,
    pub bills: Vec<Bill>,
    pub overview: Overview,
    pub sponsorship_summary: String,
}

/// Supplemental information for one bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDetail {
    pub congress: u32,
    pub bill_number: String,
    pub bill_type: String,
    pub number: String,
    pub subjects: Vec<Subject>,
    /// Oldest first.
    pub actions: Vec<Action>,
    pub text_versions: Vec<TextVersion>,
}

/// A recorded vote and, when the party split was reported, its analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteAnalysis {
    pub vote: VoteTally,
    pub partisanship: Option<PartisanshipResult>,
    pub narrative: Vec<String>,
}

/// Legislative data service over a [`CongressApiClient`].
pub struct Dashboard {
    client: Arc<dyn CongressApiClient>,
    thresholds: PartisanshipThresholds,
    page_size: u32,
}

impl Dashboard {
    pub fn new(
        client: Arc<dyn CongressApiClient>,
        thresholds: PartisanshipThresholds,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            thresholds,
            page_size,
        }
    }

    /// Fetch one page of bills, then filter, order and summarize it.
    ///
    /// A bill-type filter narrows the upstream request to that type, and the
    /// page reports the chamber that type originates in. Otherwise the
    /// requested chamber's collection is listed.
    ///
    /// # Errors
    /// Returns [`UpstreamUnavailable`] when the list cannot be fetched.
    pub async fn list_bills(&self, query: &BillQuery) -> Result<BillPage, UpstreamUnavailable> {
        let (collection, chamber) = query.filter.bill_type.map_or(
            (BillCollection::Chamber(query.chamber), query.chamber),
            |bill_type| {
                (
                    BillCollection::BillType(bill_type.code().to_string()),
                    originating_chamber(bill_type),
                )
            },
        );
        let page = Page {
            limit: query.limit.unwrap_or(self.page_size),
            offset: query.offset,
        };

        let document = self
            .client
            .list_bills(query.congress, &collection, page)
            .await
            .inspect_err(|err| {
                tracing::error!(congress = query.congress, error = %err, "bill list fetch failed");
            })?;

        let fetched = normalize_bills(&document);
        let fetched_count = fetched.len();
        let bills = query.filter.apply(fetched);
        let overview = Overview::from_bills(&bills);
        tracing::info!(
            congress = query.congress,
            chamber = %chamber,
            fetched = fetched_count,
            kept = bills.len(),
            "listed bills"
        );

        Ok(BillPage {
            congress: query.congress,
            congress_label: congress_label(query.congress),
            chamber,
            sponsorship_summary: sponsorship_summary(&overview, chamber),
            bills,
            overview,
        })
    }

    /// Fetch subjects, actions and text versions for a bill concurrently.
    ///
    /// Never fails: a section whose fetch fails comes back empty.
    pub async fn bill_detail(&self, congress: u32, bill: &BillNumber) -> BillDetail {
        let (subjects, actions, text_versions) = tokio::join!(
            degrade("subjects", bill, self.client.get_bill(congress, bill), normalize_subjects),
            degrade("actions", bill, self.client.get_bill_actions(congress, bill), normalize_actions),
            degrade("text", bill, self.client.get_bill_text(congress, bill), normalize_text_versions),
        );

        let mut actions = actions;
        sort_timeline(&mut actions);

        BillDetail {
            congress,
            bill_number: bill.to_string(),
            bill_type: bill.bill_type().to_string(),
            number: bill.number().to_string(),
            subjects,
            actions,
            text_versions,
        }
    }

    /// Fetch a bill's votes, newest first, each with its partisanship analysis.
    ///
    /// Never fails: a failed fetch yields no votes. Votes without any party
    /// breakdown are returned without an analysis.
    pub async fn vote_analysis(&self, congress: u32, bill: &BillNumber) -> Vec<VoteAnalysis> {
        let mut votes = degrade(
            "votes",
            bill,
            self.client.get_bill_votes(congress, bill),
            normalize_votes,
        )
        .await;
        sort_votes_newest_first(&mut votes);

        votes
            .into_iter()
            .map(|vote| self.analyze(vote))
            .collect()
    }

    /// Classify one vote with the configured thresholds.
    #[must_use]
    pub fn analyze(&self, vote: VoteTally) -> VoteAnalysis {
        let partisanship = vote
            .party_breakdown
            .is_reported()
            .then(|| classify_with(&vote, &self.thresholds));
        let narrative = partisanship
            .as_ref()
            .map(PartisanshipResult::narrative)
            .unwrap_or_default();

        VoteAnalysis {
            vote,
            partisanship,
            narrative,
        }
    }
}

async fn degrade<T, F>(
    section: &'static str,
    bill: &BillNumber,
    fetch: F,
    normalize: fn(&Value) -> Vec<T>,
) -> Vec<T>
where
    F: Future<Output = Result<Value, CongressApiError>>,
{
    match fetch.await {
        Ok(document) => normalize(&document),
        Err(err) => {
            tracing::warn!(section, bill = %bill, error = %err, "supplemental fetch failed; showing empty section");
            Vec::new()
        }
    }
}

/// One-sentence comparison of Democratic and Republican sponsorship.
#[must_use]
pub fn sponsorship_summary(overview: &Overview, chamber: Chamber) -> String {
    let dem = (Party::D, overview.dem_sponsored, overview.dem_sponsored_pct);
    let rep = (Party::R, overview.rep_sponsored, overview.rep_sponsored_pct);
    let ((leader, lead_count, lead_pct), (other, other_count, other_pct)) =
        match overview.leading_party {
            Some(Party::D) => (dem, rep),
            Some(_) => (rep, dem),
            None => {
                return format!(
                    "Both parties have sponsored an equal number of bills in this congress, with {} bills each.",
                    overview.dem_sponsored
                )
            }
        };
    let majority = if leader == Party::D {
        "Democratic"
    } else {
        "Republican"
    };

    format!(
        "{} have sponsored {lead_count} bills ({lead_pct:.1}%) in this congress, compared to {other_count} bills ({other_pct:.1}%) sponsored by {}. This reflects the {majority} majority in the {chamber}.",
        leader.plural_name(),
        other.plural_name(),
    )
}

/// Chamber a bill type originates in.
const fn originating_chamber(bill_type: BillTypeFilter) -> Chamber {
    match bill_type {
        BillTypeFilter::Hr | BillTypeFilter::Hjres => Chamber::House,
        BillTypeFilter::S | BillTypeFilter::Sjres => Chamber::Senate,
    }
}

//! Partisanship classification of roll-call votes.
//!
//! The classifier compares the share of each party voting yea. A party that
//! cast no yea or nay votes counts as 0% yea, which makes "took no position"
//! indistinguishable from "voted unanimously nay". Callers that care should
//! check [`PartyBreakdown::is_reported`](crate::PartyBreakdown::is_reported)
//! or the per-party totals first.

use serde::{Deserialize, Serialize};

use crate::records::{PartyTally, VoteTally};

/// Share of the party voting yea that makes its support a majority.
const MAJORITY_PCT: f64 = 50.0;

/// Both parties above this share mark a consensus vote.
const CONSENSUS_PCT: f64 = 70.0;

/// Gaps between the parties' yea percentages that separate the categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartisanshipThresholds {
    /// A gap strictly above this is [`Category::Partisan`].
    pub partisan: f64,
    /// A gap strictly above this (and not partisan) is [`Category::ModeratelyPartisan`].
    pub moderate: f64,
}

impl PartisanshipThresholds {
    pub const DEFAULT: Self = Self {
        partisan: 50.0,
        moderate: 20.0,
    };
}

impl Default for PartisanshipThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Partisan,
    ModeratelyPartisan,
    Bipartisan,
}

/// Whose support carried a vote that passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisiveParty {
    D,
    R,
    Both,
    /// Passed, but neither party's majority lines up with a clear story.
    Neither,
}

/// Derived view of a vote's party split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartisanshipResult {
    pub dem_yea_pct: f64,
    pub rep_yea_pct: f64,
    pub category: Category,
    /// Only present when the vote passed.
    pub decisive_party: Option<DecisiveParty>,
    pub dem_unity: f64,
    pub rep_unity: f64,
    pub opposite_positions: bool,
    pub strong_consensus: bool,
}

/// Percentage of a party's yea+nay votes that were yea; 0 when it cast none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn yea_pct(tally: PartyTally) -> f64 {
    let total = tally.cast();
    if total == 0 {
        return 0.0;
    }
    f64::from(tally.yea) / total as f64 * 100.0
}

/// Share of a party voting with its own majority.
#[must_use]
pub fn unity(yea_pct: f64) -> f64 {
    yea_pct.max(100.0 - yea_pct)
}

/// Classify a gap between the parties' yea percentages.
#[must_use]
pub fn categorize(gap: f64, thresholds: &PartisanshipThresholds) -> Category {
    if gap > thresholds.partisan {
        Category::Partisan
    } else if gap > thresholds.moderate {
        Category::ModeratelyPartisan
    } else {
        Category::Bipartisan
    }
}

fn decisive_party(dem_pct: f64, rep_pct: f64) -> DecisiveParty {
    match (dem_pct > MAJORITY_PCT, rep_pct > MAJORITY_PCT) {
        (true, true) => DecisiveParty::Both,
        (true, false) if rep_pct < MAJORITY_PCT => DecisiveParty::D,
        (false, true) if dem_pct < MAJORITY_PCT => DecisiveParty::R,
        _ => DecisiveParty::Neither,
    }
}

/// Classify a vote with the default thresholds.
#[must_use]
pub fn classify(vote: &VoteTally) -> PartisanshipResult {
    classify_with(vote, &PartisanshipThresholds::DEFAULT)
}

/// Classify a vote with caller-supplied thresholds.
#[must_use]
pub fn classify_with(vote: &VoteTally, thresholds: &PartisanshipThresholds) -> PartisanshipResult {
    let dem_yea_pct = yea_pct(vote.party_breakdown.democratic);
    let rep_yea_pct = yea_pct(vote.party_breakdown.republican);
    let category = categorize((dem_yea_pct - rep_yea_pct).abs(), thresholds);

    let opposite_positions = (dem_yea_pct > MAJORITY_PCT && rep_yea_pct < MAJORITY_PCT)
        || (dem_yea_pct < MAJORITY_PCT && rep_yea_pct > MAJORITY_PCT);
    let strong_consensus = category == Category::Bipartisan
        && dem_yea_pct > CONSENSUS_PCT
        && rep_yea_pct > CONSENSUS_PCT;

    PartisanshipResult {
        dem_yea_pct,
        rep_yea_pct,
        category,
        decisive_party: vote
            .passed()
            .then(|| decisive_party(dem_yea_pct, rep_yea_pct)),
        dem_unity: unity(dem_yea_pct),
        rep_unity: unity(rep_yea_pct),
        opposite_positions,
        strong_consensus,
    }
}

impl PartisanshipResult {
    /// Plain-text sentences describing the split, one per line.
    #[must_use]
    pub fn narrative(&self) -> Vec<String> {
        let (dem, rep) = (self.dem_yea_pct, self.rep_yea_pct);
        let mut lines = Vec::new();

        match self.category {
            Category::Partisan => {
                lines.push("Highly partisan vote".to_string());
                lines.push(format!(
                    "This was a clear party-line vote with {dem:.1}% of Democrats and {rep:.1}% of Republicans voting 'Yea'."
                ));
                if self.opposite_positions {
                    lines.push("The parties took opposite positions on this legislation.".to_string());
                }
            }
            Category::ModeratelyPartisan => {
                lines.push("Moderately partisan vote".to_string());
                lines.push(format!(
                    "This vote showed some partisan division with {dem:.1}% of Democrats and {rep:.1}% of Republicans voting 'Yea'."
                ));
            }
            Category::Bipartisan => {
                lines.push("Bipartisan vote".to_string());
                lines.push(format!(
                    "This was a bipartisan vote with {dem:.1}% of Democrats and {rep:.1}% of Republicans voting 'Yea'."
                ));
                if self.strong_consensus {
                    lines.push(
                        "Strong bipartisan support suggests this was a consensus issue.".to_string(),
                    );
                }
            }
        }

        match self.decisive_party {
            Some(DecisiveParty::D) => {
                lines.push("This bill passed primarily with Democratic support.".to_string());
            }
            Some(DecisiveParty::R) => {
                lines.push("This bill passed primarily with Republican support.".to_string());
            }
            Some(DecisiveParty::Both) => {
                lines.push("This bill received support from both parties.".to_string());
            }
            Some(DecisiveParty::Neither) | None => {}
        }

        lines
    }
}

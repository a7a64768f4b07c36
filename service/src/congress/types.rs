//! Request parameter types for the Congress.gov API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chamber of Congress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Chamber {
    #[default]
    #[serde(alias = "house", alias = "HOUSE")]
    House,
    #[serde(alias = "senate", alias = "SENATE")]
    Senate,
}

impl Chamber {
    /// Lowercase path segment used by the bill list endpoint.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::House => "House",
            Self::Senate => "Senate",
        })
    }
}

/// Error returned for a chamber other than House or Senate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chamber '{0}', expected House or Senate")]
pub struct ChamberParseError(String);

impl FromStr for Chamber {
    type Err = ChamberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Self::House),
            "senate" => Ok(Self::Senate),
            _ => Err(ChamberParseError(s.to_string())),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// Which collection the bill list endpoint reads from.
///
/// The list endpoint is keyed by a single path segment after the congress
/// number: either a chamber or a bill type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillCollection {
    Chamber(Chamber),
    BillType(String),
}

impl BillCollection {
    #[must_use]
    pub fn path_segment(&self) -> &str {
        match self {
            Self::Chamber(chamber) => chamber.as_path(),
            Self::BillType(code) => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chamber_parses_case_insensitively() {
        assert_eq!("House".parse::<Chamber>(), Ok(Chamber::House));
        assert_eq!(" senate ".parse::<Chamber>(), Ok(Chamber::Senate));
        assert!("Congress".parse::<Chamber>().is_err());
    }

    #[test]
    fn chamber_deserializes_display_and_lowercase_names() {
        let parsed: Vec<Chamber> =
            serde_json::from_str(r#"["House", "senate", "SENATE"]"#).expect("valid chambers");
        assert_eq!(parsed, vec![Chamber::House, Chamber::Senate, Chamber::Senate]);
    }

    #[test]
    fn collection_path_segment() {
        assert_eq!(BillCollection::Chamber(Chamber::Senate).path_segment(), "senate");
        assert_eq!(BillCollection::BillType("hjres".into()).path_segment(), "hjres");
    }
}

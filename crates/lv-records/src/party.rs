//! Party affiliation codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Party affiliation of a legislator.
///
/// The upstream source only reports Democratic and Republican breakdowns
/// for votes, but sponsors may carry other codes. Anything that is not
/// recognized collapses to [`Party::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Party {
    D,
    R,
    I,
    #[default]
    Unknown,
}

impl Party {
    /// Map a raw party string from the source onto a party code.
    ///
    /// Accepts single-letter codes and full names, case-insensitively.
    #[must_use]
    pub fn from_code(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "d" | "democrat" | "democratic" => Self::D,
            "r" | "republican" => Self::R,
            "i" | "id" | "independent" => Self::I,
            _ => Self::Unknown,
        }
    }

    /// Single-letter code, or an empty string for [`Party::Unknown`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::D => "D",
            Self::R => "R",
            Self::I => "I",
            Self::Unknown => "",
        }
    }

    /// Plural display name used in narratives ("Democrats").
    #[must_use]
    pub const fn plural_name(self) -> &'static str {
        match self {
            Self::D => "Democrats",
            Self::R => "Republicans",
            Self::I => "Independents",
            Self::Unknown => "Unaffiliated",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            other => f.write_str(other.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_accepts_letters_and_names() {
        assert_eq!(Party::from_code("D"), Party::D);
        assert_eq!(Party::from_code("democratic"), Party::D);
        assert_eq!(Party::from_code(" r "), Party::R);
        assert_eq!(Party::from_code("Republican"), Party::R);
        assert_eq!(Party::from_code("ID"), Party::I);
    }

    #[test]
    fn from_code_maps_anything_else_to_unknown() {
        assert_eq!(Party::from_code(""), Party::Unknown);
        assert_eq!(Party::from_code("L"), Party::Unknown);
        assert_eq!(Party::from_code("Green"), Party::Unknown);
    }

    #[test]
    fn plural_names() {
        assert_eq!(Party::D.plural_name(), "Democrats");
        assert_eq!(Party::R.plural_name(), "Republicans");
        assert_eq!(Party::Unknown.plural_name(), "Unaffiliated");
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(Party::D.to_string(), "D");
        assert_eq!(Party::Unknown.to_string(), "Unknown");
    }
}

//! Bill numbers such as `HR1234`, split into a type tag and a number.
//!
//! A resolvable bill number is one or more ASCII letters followed by one or
//! more ASCII digits, nothing else. The letters become the lowercase type
//! tag used in upstream URLs (`hr`, `s`, `hjres`).

use std::fmt;
use std::str::FromStr;

/// A bill number that can be resolved against the detail endpoints.
///
/// Construct via [`BillNumber::parse`] or [`str::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BillNumber {
    bill_type: String,
    number: String,
}

/// Error returned when a bill number does not have the `letters+digits` shape.
///
/// Callers treat this as recoverable: the bill stays listed, only its detail
/// and vote lookups are disabled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse bill number '{input}'")]
pub struct BillNumberError {
    input: String,
}

impl BillNumberError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl BillNumber {
    /// Parse `HR1234` into `("hr", "1234")`.
    ///
    /// # Errors
    /// Returns [`BillNumberError`] for letters only, digits only, trailing
    /// letters after the digits, any other character, or an empty string.
    pub fn parse(input: &str) -> Result<Self, BillNumberError> {
        let split = input
            .bytes()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(input.len());
        let (letters, digits) = input.split_at(split);

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(BillNumberError {
                input: input.to_string(),
            });
        }

        Ok(Self {
            bill_type: letters.to_ascii_lowercase(),
            number: digits.to_string(),
        })
    }

    /// Lowercase type tag (`hr`, `s`, `hjres`, ...).
    #[must_use]
    pub fn bill_type(&self) -> &str {
        &self.bill_type
    }

    /// The digit portion, leading zeros preserved.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl FromStr for BillNumber {
    type Err = BillNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bill_type.to_ascii_uppercase(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_number() {
        let parsed = BillNumber::parse("HR1234").expect("valid");
        assert_eq!(parsed.bill_type(), "hr");
        assert_eq!(parsed.number(), "1234");
    }

    #[test]
    fn lowercases_mixed_case_letters() {
        let parsed: BillNumber = "hJRes7".parse().expect("valid");
        assert_eq!(parsed.bill_type(), "hjres");
        assert_eq!(parsed.number(), "7");
    }

    #[test]
    fn rejects_other_shapes() {
        for input in ["1234", "HR", "", "HR12A", "H.R.12", "HR 12", " HR12", "12HR"] {
            let err = BillNumber::parse(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert!(BillNumber::parse("HR١٢").is_err());
    }

    #[test]
    fn display_is_uppercase_type_then_number() {
        let parsed = BillNumber::parse("sjres42").expect("valid");
        assert_eq!(parsed.to_string(), "SJRES42");
    }

    #[test]
    fn error_message_names_input() {
        let err = BillNumber::parse("1234").unwrap_err();
        assert_eq!(err.to_string(), "could not parse bill number '1234'");
    }
}

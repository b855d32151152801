use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the input boundary, before any value reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("{0} is outside the raw score range 0-100")]
    OutOfRange(String),

    #[error("unknown subject '{0}' (expected chemistry, biology, politics or geography)")]
    UnknownSubject(String),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
}

/// A validated raw score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RawScore(u8);

impl RawScore {
    pub const MIN: RawScore = RawScore(0);
    pub const MAX: RawScore = RawScore(100);

    pub fn new(value: u8) -> Result<Self, InputError> {
        if value > Self::MAX.0 {
            return Err(InputError::OutOfRange(value.to_string()));
        }
        Ok(RawScore(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every raw score in the domain, ascending.
    pub fn all() -> impl Iterator<Item = RawScore> {
        (Self::MIN.0..=Self::MAX.0).map(RawScore)
    }
}

impl TryFrom<i32> for RawScore {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InputError::OutOfRange(value.to_string()))
            .and_then(RawScore::new)
    }
}

impl From<RawScore> for i32 {
    fn from(raw: RawScore) -> Self {
        raw.0 as i32
    }
}

impl fmt::Display for RawScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RawScore {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_raw_input(s)? {
            Some(raw) => Ok(raw),
            None => Err(InputError::NotANumber(s.to_string())),
        }
    }
}

/// Parse the text a user typed into a raw-score field.
///
/// Blank input means "not entered yet" and yields `Ok(None)`, which keeps it
/// distinct from an entered zero. Anything other than plain digits is
/// rejected, as is a value above 100.
pub fn parse_raw_input(text: &str) -> Result<Option<RawScore>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber(text.to_string()));
    }

    // All digits: a parse failure can only be overflow
    let value: u32 = text
        .parse()
        .map_err(|_| InputError::OutOfRange(text.to_string()))?;
    let value = u8::try_from(value).map_err(|_| InputError::OutOfRange(text.to_string()))?;
    RawScore::new(value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_not_entered() {
        assert_eq!(parse_raw_input("").unwrap(), None);
        assert_eq!(parse_raw_input("   ").unwrap(), None);
    }

    #[test]
    fn test_zero_is_distinct_from_blank() {
        assert_eq!(parse_raw_input("0").unwrap(), Some(RawScore::MIN));
    }

    #[test]
    fn test_valid_scores() {
        assert_eq!(parse_raw_input("85").unwrap().map(RawScore::value), Some(85));
        assert_eq!(parse_raw_input(" 100 ").unwrap(), Some(RawScore::MAX));
        assert_eq!(parse_raw_input("007").unwrap().map(RawScore::value), Some(7));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(matches!(parse_raw_input("abc"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_raw_input("12a"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_raw_input("-5"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_raw_input("8.5"), Err(InputError::NotANumber(_))));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(parse_raw_input("101"), Err(InputError::OutOfRange(_))));
        assert!(matches!(parse_raw_input("256"), Err(InputError::OutOfRange(_))));
        assert!(matches!(
            parse_raw_input("99999999999999999999"),
            Err(InputError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_try_from_i32() {
        assert_eq!(RawScore::try_from(42).unwrap().value(), 42);
        assert!(RawScore::try_from(-1).is_err());
        assert!(RawScore::try_from(101).is_err());
    }

    #[test]
    fn test_from_str_requires_a_value() {
        assert!("".parse::<RawScore>().is_err());
        assert_eq!("60".parse::<RawScore>().unwrap().value(), 60);
    }

    #[test]
    fn test_all_covers_domain() {
        let all: Vec<_> = RawScore::all().collect();
        assert_eq!(all.len(), 101);
        assert_eq!(all[0], RawScore::MIN);
        assert_eq!(all[100], RawScore::MAX);
    }
}

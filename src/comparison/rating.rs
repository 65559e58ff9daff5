/*!
 * Rating parsing and clamping.
 *
 * User input for a rating is free text. It is read as a leading integer,
 * clamped into the accepted range and applied to one candidate. Input that
 * does not start with an integer is ignored without surfacing an error.
 */

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::candidate::ComparisonState;

/// A user score for one candidate, always within `[Rating::MIN, Rating::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted score
    pub const MIN: Rating = Rating(1);

    /// Highest accepted score
    pub const MAX: Rating = Rating(10);

    /// Score given to every candidate when a comparison is loaded
    pub const DEFAULT: Rating = Rating(5);

    /// Create a rating, rejecting values outside the accepted range
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Create a rating, pulling out-of-range values to the nearest bound
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// The numeric score
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {} is outside 1..=10", value))
    }
}

/// Result of applying raw rating input to a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    /// The input parsed; the candidate now holds this (clamped) rating
    Changed(Rating),
    /// The input was rejected or the candidate is unknown; nothing changed
    Unchanged,
}

impl RatingOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Read the leading integer of `raw`.
///
/// Surrounding whitespace and one sign character are accepted, then the
/// leading run of ASCII digits is taken and anything after it is ignored.
/// Digit runs too large for `i64` saturate.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }

    Some(if negative { -value } else { value })
}

/// Parse raw input into a rating, clamping any integer into range
pub fn parse_rating(raw: &str) -> Option<Rating> {
    parse_leading_integer(raw).map(Rating::clamped)
}

/// Apply raw rating input to the candidate with `candidate_id`.
///
/// Returns the resulting state together with the outcome. On `Unchanged`
/// the returned state equals the input state.
pub fn apply_rating(
    state: &ComparisonState,
    candidate_id: &str,
    raw_input: &str,
) -> (ComparisonState, RatingOutcome) {
    if state.rating(candidate_id).is_none() {
        debug!("Ignoring rating for unknown candidate '{}'", candidate_id);
        return (state.clone(), RatingOutcome::Unchanged);
    }

    match parse_rating(raw_input) {
        Some(rating) => (
            state.with_rating(candidate_id, rating),
            RatingOutcome::Changed(rating),
        ),
        None => {
            debug!(
                "Rejected rating input {:?} for candidate '{}'",
                raw_input, candidate_id
            );
            (state.clone(), RatingOutcome::Unchanged)
        }
    }
}

//! Value objects owned by the musician profile.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError, VenueId};

/// Rating every new musician starts with.
pub const DEFAULT_ELO_RATING: u32 = 1000;

/// Reputation score. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EloRating(u32);

impl EloRating {
    /// Creates a rating, rejecting zero.
    pub fn try_new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "eloRating",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric rating.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for EloRating {
    fn default() -> Self {
        Self(DEFAULT_ELO_RATING)
    }
}

impl TryFrom<u32> for EloRating {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        EloRating::try_new(value)
    }
}

impl From<EloRating> for u32 {
    fn from(value: EloRating) -> Self {
        value.0
    }
}

impl fmt::Display for EloRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A past show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub venue_id: VenueId,
    pub date: Timestamp,
    pub attendance: u32,
}

/// A period the musician is available to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

impl AvailabilityWindow {
    /// Validates ordering of the window and its recurrence description.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_date.is_before(&self.start_date) {
            return Err(ValidationError::invalid_format(
                "availability",
                "endDate must not be before startDate",
            ));
        }
        if !self.recurring && self.recurrence_pattern.is_some() {
            return Err(ValidationError::invalid_format(
                "availability.recurrencePattern",
                "only recurring windows may carry a pattern",
            ));
        }
        Ok(())
    }
}

//! Value objects owned by the venue profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{require_non_blank, TimeOfDay, Timestamp, ValidationError};

/// Geographic position of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validates latitude in [-90, 90] and longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::invalid_format(
                "location.coordinates.latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::invalid_format(
                "location.coordinates.longitude",
                format!("{} is outside [-180, 180]", self.longitude),
            ));
        }
        Ok(())
    }
}

/// Postal location of a venue.
///
/// `city` and `state` are matched exactly by venue search, so they are stored
/// trimmed but otherwise as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Returns a trimmed copy, rejecting blank parts.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        if let Some(coordinates) = &self.coordinates {
            coordinates.validate()?;
        }
        Ok(Self {
            address: require_non_blank("location.address", &self.address)?,
            city: require_non_blank("location.city", &self.city)?,
            state: require_non_blank("location.state", &self.state)?,
            zip_code: require_non_blank("location.zipCode", &self.zip_code)?,
            coordinates: self.coordinates,
        })
    }
}

/// A bookable slot on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub date: Timestamp,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilitySlot {
    /// A slot must have non-zero length. Slots may run past midnight.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time == self.end_time {
            return Err(ValidationError::invalid_format(
                "availability",
                "startTime and endTime must differ",
            ));
        }
        Ok(())
    }
}

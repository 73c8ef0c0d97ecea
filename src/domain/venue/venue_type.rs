//! Venue categories offered at registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of venue. Stored as an amenity tag rather than a separate field, so
/// it participates in amenity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VenueType {
    Bar,
    Club,
    ConcertHall,
    CoffeeShop,
    Restaurant,
    Theater,
    OutdoorSpace,
    ArtGallery,
    Other,
}

impl VenueType {
    pub const ALL: [VenueType; 9] = [
        VenueType::Bar,
        VenueType::Club,
        VenueType::ConcertHall,
        VenueType::CoffeeShop,
        VenueType::Restaurant,
        VenueType::Theater,
        VenueType::OutdoorSpace,
        VenueType::ArtGallery,
        VenueType::Other,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            VenueType::Bar => "Bar",
            VenueType::Club => "Club",
            VenueType::ConcertHall => "Concert Hall",
            VenueType::CoffeeShop => "Coffee Shop",
            VenueType::Restaurant => "Restaurant",
            VenueType::Theater => "Theater",
            VenueType::OutdoorSpace => "Outdoor Space",
            VenueType::ArtGallery => "Art Gallery",
            VenueType::Other => "Other",
        }
    }

    /// Amenity tag recorded for this type. `Other` carries no tag.
    pub fn amenity_tag(&self) -> Option<String> {
        match self {
            VenueType::Other => None,
            other => Some(other.label().to_lowercase().replace(' ', "-")),
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VenueType {
    type Err = ValidationError;

    /// Accepts the label or the tag form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        VenueType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format("venueType", format!("unknown venue type '{}'", s))
            })
    }
}

impl TryFrom<String> for VenueType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VenueType> for String {
    fn from(value: VenueType) -> Self {
        value.label().to_string()
    }
}

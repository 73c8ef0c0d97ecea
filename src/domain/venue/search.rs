//! Venue search criteria.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{normalize_tags, ValidationError};

/// Inclusive capacity bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl CapacityRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Fields a search may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VenueSortField {
    Capacity,
    CreatedAt,
}

impl VenueSortField {
    /// Document field the sort applies to.
    pub fn field_path(&self) -> &'static str {
        match self {
            VenueSortField::Capacity => "capacity",
            VenueSortField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Multi-criteria venue query. Every part is optional; empty criteria list
/// all venues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub capacity: CapacityRange,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<VenueSortField>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl VenueSearchCriteria {
    /// Validates the criteria and normalizes them for planning.
    ///
    /// Blank city/state are treated as absent, amenity tags are normalized the
    /// same way venue amenities are stored, and a zero row cap means no cap.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        if let (Some(min), Some(max)) = (self.capacity.min, self.capacity.max) {
            if min > max {
                return Err(ValidationError::invalid_format(
                    "capacity",
                    format!("min ({}) must not exceed max ({})", min, max),
                ));
            }
        }

        Ok(Self {
            city: non_blank(self.city),
            state: non_blank(self.state),
            capacity: self.capacity,
            amenities: normalize_tags(&self.amenities),
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            max_results: self.max_results.filter(|n| *n > 0),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

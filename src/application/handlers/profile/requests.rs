//! Typed request bodies for the profile operations.
//!
//! Creation requests keep every field optional so a missing field surfaces
//! as a validation error naming it rather than a deserialization failure.

use serde::Deserialize;

use crate::domain::foundation::{MediaItem, PaymentTerms, ValidationError};
use crate::domain::musician::{AvailabilityWindow, MusicianDraft, MusicianPatch, PerformanceRecord};
use crate::domain::venue::{AvailabilitySlot, Location, VenueDraft, VenuePatch, VenueType};

/// Request to create a musician profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMusicianProfileRequest {
    pub name: Option<String>,
    pub genre: Option<Vec<String>>,
    pub bio: Option<String>,
    pub media_urls: Option<Vec<MediaItem>>,
    pub performance_history: Option<Vec<PerformanceRecord>>,
    pub availability: Option<Vec<AvailabilityWindow>>,
}

impl CreateMusicianProfileRequest {
    /// Checks required fields and fills absent sequences with empty ones.
    pub fn into_draft(self) -> Result<MusicianDraft, ValidationError> {
        Ok(MusicianDraft {
            name: self.name.ok_or_else(|| ValidationError::empty_field("name"))?,
            bio: self.bio.ok_or_else(|| ValidationError::empty_field("bio"))?,
            genre: self.genre.unwrap_or_default(),
            media_urls: self.media_urls.unwrap_or_default(),
            performance_history: self.performance_history.unwrap_or_default(),
            availability: self.availability.unwrap_or_default(),
        })
    }
}

/// Request to update a musician profile. Absent fields are left alone.
pub type UpdateMusicianProfileRequest = MusicianPatch;

/// Request to create a venue profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueProfileRequest {
    pub name: Option<String>,
    pub venue_type: Option<VenueType>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub capacity: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub media_urls: Option<Vec<MediaItem>>,
    pub payment_terms: Option<PaymentTerms>,
    pub availability: Option<Vec<AvailabilitySlot>>,
}

impl CreateVenueProfileRequest {
    /// Checks required fields and fills absent sequences with empty ones.
    pub fn into_draft(self) -> Result<VenueDraft, ValidationError> {
        Ok(VenueDraft {
            name: self.name.ok_or_else(|| ValidationError::empty_field("name"))?,
            description: self
                .description
                .ok_or_else(|| ValidationError::empty_field("description"))?,
            location: self
                .location
                .ok_or_else(|| ValidationError::empty_field("location"))?,
            capacity: self
                .capacity
                .ok_or_else(|| ValidationError::empty_field("capacity"))?,
            venue_type: self.venue_type,
            amenities: self.amenities.unwrap_or_default(),
            media_urls: self.media_urls.unwrap_or_default(),
            payment_terms: self.payment_terms.unwrap_or_default(),
            availability: self.availability.unwrap_or_default(),
        })
    }
}

/// Request to update a venue profile. Absent fields are left alone.
pub type UpdateVenueProfileRequest = VenuePatch;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bio_names_the_field() {
        let request: CreateMusicianProfileRequest =
            serde_json::from_str(r#"{"name":"The Lowdowns"}"#).unwrap();
        assert_eq!(request.into_draft().unwrap_err().field(), "bio");
    }

    #[test]
    fn absent_sequences_default_to_empty() {
        let draft = CreateMusicianProfileRequest {
            name: Some("The Lowdowns".to_string()),
            bio: Some("x".repeat(60)),
            ..Default::default()
        }
        .into_draft()
        .unwrap();
        assert!(draft.genre.is_empty());
        assert!(draft.media_urls.is_empty());
        assert!(draft.availability.is_empty());
    }

    #[test]
    fn venue_request_reads_type_label() {
        let request: CreateVenueProfileRequest = serde_json::from_str(
            r#"{"name":"Mohawk","venueType":"Bar","capacity":400}"#,
        )
        .unwrap();
        assert_eq!(request.venue_type, Some(VenueType::Bar));
        assert_eq!(request.into_draft().unwrap_err().field(), "description");
    }
}

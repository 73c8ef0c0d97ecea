//! Venue profile aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_tags, require_min_chars, require_non_blank, MediaItem, MediaType, PaymentTerms,
    Timestamp, UserId, ValidationError, VenueId, MIN_PROFILE_TEXT_LENGTH,
};

use super::{AvailabilitySlot, Location, VenueType};

/// Validated input for a new venue profile.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub venue_type: Option<VenueType>,
    pub description: String,
    pub location: Location,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub media_urls: Vec<MediaItem>,
    pub payment_terms: PaymentTerms,
    pub availability: Vec<AvailabilitySlot>,
}

/// Venue aggregate.
///
/// # Invariants
///
/// - `name` is non-blank, `description` has at least 50 characters
/// - `capacity >= 1`
/// - `amenities` is a set of lowercase tags, including the venue type tag
/// - `media_urls` holds images only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    id: VenueId,
    user_id: UserId,
    name: String,
    description: String,
    location: Location,
    capacity: u32,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    media_urls: Vec<MediaItem>,
    #[serde(default)]
    payment_terms: PaymentTerms,
    #[serde(default)]
    availability: Vec<AvailabilitySlot>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Venue {
    /// Creates a new venue profile.
    pub fn create(
        id: VenueId,
        user_id: UserId,
        draft: VenueDraft,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = require_non_blank("name", &draft.name)?;
        let description = validate_description(&draft.description)?;
        let location = draft.location.normalized()?;
        validate_capacity(draft.capacity)?;
        validate_media(&draft.media_urls)?;
        validate_availability(&draft.availability)?;
        let payment_terms = draft.payment_terms.normalized()?;

        Ok(Self {
            id,
            user_id,
            name,
            description,
            location,
            capacity: draft.capacity,
            amenities: amenities_with_type(&draft.amenities, draft.venue_type),
            media_urls: draft.media_urls,
            payment_terms,
            availability: draft.availability,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &VenueId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    pub fn media_urls(&self) -> &[MediaItem] {
        &self.media_urls
    }

    pub fn payment_terms(&self) -> &PaymentTerms {
        &self.payment_terms
    }

    pub fn availability(&self) -> &[AvailabilitySlot] {
        &self.availability
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Returns true if every requested tag is among the venue amenities.
    pub fn has_amenities(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.amenities.contains(tag))
    }

    /// Applies a validated patch.
    ///
    /// Returns the patch as actually applied: a supplied venue type is folded
    /// into the amenity set, replacing any previous type tag.
    pub fn apply(&mut self, patch: VenuePatch, now: Timestamp) -> VenuePatch {
        let mut applied = patch;

        if let Some(venue_type) = applied.venue_type {
            let base = applied
                .amenities
                .clone()
                .unwrap_or_else(|| without_type_tags(&self.amenities));
            applied.amenities = Some(amenities_with_type(&base, Some(venue_type)));
        } else if let Some(amenities) = &applied.amenities {
            let kept = type_tags(&self.amenities);
            applied.amenities = Some(normalize_tags(amenities.iter().chain(kept.iter())));
        }

        if let Some(name) = &applied.name {
            self.name = name.clone();
        }
        if let Some(description) = &applied.description {
            self.description = description.clone();
        }
        if let Some(location) = &applied.location {
            self.location = location.clone();
        }
        if let Some(capacity) = applied.capacity {
            self.capacity = capacity;
        }
        if let Some(amenities) = &applied.amenities {
            self.amenities = amenities.clone();
        }
        if let Some(media) = &applied.media_urls {
            self.media_urls = media.clone();
        }
        if let Some(terms) = &applied.payment_terms {
            self.payment_terms = terms.clone();
        }
        if let Some(availability) = &applied.availability {
            self.availability = availability.clone();
        }
        self.updated_at = now;
        applied
    }
}

/// Field-level partial update of a venue profile.
///
/// `venue_type` is never written on its own; see [`Venue::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuePatch {
    #[serde(default, skip_serializing)]
    pub venue_type: Option<VenueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<MediaItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<PaymentTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<AvailabilitySlot>>,
}

impl VenuePatch {
    /// Validates supplied fields and normalizes them.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let name = self
            .name
            .map(|name| require_non_blank("name", &name))
            .transpose()?;
        let description = self
            .description
            .map(|text| validate_description(&text))
            .transpose()?;
        let location = self.location.map(Location::normalized).transpose()?;
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        if let Some(media) = &self.media_urls {
            validate_media(media)?;
        }
        if let Some(availability) = &self.availability {
            validate_availability(availability)?;
        }
        let payment_terms = self
            .payment_terms
            .map(PaymentTerms::normalized)
            .transpose()?;

        Ok(Self {
            venue_type: self.venue_type,
            name,
            description,
            location,
            capacity: self.capacity,
            amenities: self.amenities.map(normalize_tags),
            media_urls: self.media_urls,
            payment_terms,
            availability: self.availability,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_description(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    require_min_chars("description", text, MIN_PROFILE_TEXT_LENGTH)?;
    Ok(text.to_string())
}

fn validate_capacity(capacity: u32) -> Result<(), ValidationError> {
    if capacity < 1 {
        return Err(ValidationError::out_of_range(
            "capacity",
            1,
            i64::from(u32::MAX),
            i64::from(capacity),
        ));
    }
    Ok(())
}

fn validate_media(media: &[MediaItem]) -> Result<(), ValidationError> {
    for item in media {
        if item.media_type != MediaType::Image {
            return Err(ValidationError::invalid_format(
                "mediaUrls.type",
                "venues accept images only",
            ));
        }
        item.validate()?;
    }
    Ok(())
}

fn validate_availability(slots: &[AvailabilitySlot]) -> Result<(), ValidationError> {
    slots.iter().try_for_each(AvailabilitySlot::validate)
}

fn amenities_with_type(amenities: &[String], venue_type: Option<VenueType>) -> Vec<String> {
    let type_tag = venue_type.and_then(|t| t.amenity_tag());
    normalize_tags(amenities.iter().cloned().chain(type_tag))
}

fn all_type_tags() -> Vec<String> {
    VenueType::ALL
        .iter()
        .filter_map(VenueType::amenity_tag)
        .collect()
}

fn without_type_tags(amenities: &[String]) -> Vec<String> {
    let type_tags = all_type_tags();
    amenities
        .iter()
        .filter(|tag| !type_tags.contains(tag))
        .cloned()
        .collect()
}

fn type_tags(amenities: &[String]) -> Vec<String> {
    let type_tags = all_type_tags();
    amenities
        .iter()
        .filter(|tag| type_tags.contains(tag))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> String {
        "Intimate basement room with a proper PA and a late licence.".to_string()
    }

    fn draft() -> VenueDraft {
        VenueDraft {
            name: "The Cellar".to_string(),
            venue_type: Some(VenueType::Club),
            description: description(),
            location: Location {
                address: "1 Main St".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_code: "78701".to_string(),
                coordinates: None,
            },
            capacity: 120,
            amenities: vec!["Parking".to_string(), "stage".to_string()],
            media_urls: Vec::new(),
            payment_terms: PaymentTerms::default(),
            availability: Vec::new(),
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse_iso("2024-05-01T12:00:00Z").unwrap()
    }

    fn create(draft: VenueDraft) -> Result<Venue, ValidationError> {
        Venue::create(VenueId::new(), UserId::new("venue-user").unwrap(), draft, now())
    }

    #[test]
    fn create_merges_type_tag_into_amenities() {
        let venue = create(draft()).unwrap();
        assert_eq!(venue.amenities(), ["parking", "stage", "club"]);
    }

    #[test]
    fn create_without_type_keeps_amenities() {
        let venue = create(VenueDraft {
            venue_type: None,
            ..draft()
        })
        .unwrap();
        assert_eq!(venue.amenities(), ["parking", "stage"]);
    }

    #[test]
    fn create_rejects_zero_capacity() {
        let err = create(VenueDraft {
            capacity: 0,
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.field(), "capacity");
    }

    #[test]
    fn create_rejects_short_description() {
        let err = create(VenueDraft {
            description: "Tiny".to_string(),
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { min: 50, actual: 4, .. }));
    }

    #[test]
    fn create_rejects_non_image_media() {
        let result = create(VenueDraft {
            media_urls: vec![MediaItem {
                media_type: MediaType::Video,
                url: "https://example.com/tour.mp4".to_string(),
                caption: None,
            }],
            ..draft()
        });
        assert!(result.is_err());
    }

    #[test]
    fn amenity_patch_keeps_existing_type_tag() {
        let mut venue = create(draft()).unwrap();
        let applied = venue.apply(
            VenuePatch {
                amenities: Some(vec!["pa".to_string()]),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(venue.amenities(), ["pa", "club"]);
        assert_eq!(applied.amenities.as_deref(), Some(venue.amenities()));
    }

    #[test]
    fn has_amenities_requires_superset() {
        let venue = create(draft()).unwrap();
        assert!(venue.has_amenities(&["parking".to_string()]));
        assert!(venue.has_amenities(&[]));
        assert!(!venue.has_amenities(&["parking".to_string(), "bar".to_string()]));
    }

    #[test]
    fn patch_venue_type_replaces_previous_type_tag() {
        let mut venue = create(draft()).unwrap();
        let patch = VenuePatch {
            venue_type: Some(VenueType::Theater),
            ..Default::default()
        }
        .validated()
        .unwrap();

        let applied = venue.apply(patch, now().plus_secs(1));

        assert_eq!(venue.amenities(), ["parking", "stage", "theater"]);
        assert_eq!(applied.amenities.as_deref(), Some(venue.amenities()));
    }

    #[test]
    fn patch_serializes_without_venue_type() {
        let patch = VenuePatch {
            venue_type: Some(VenueType::Bar),
            capacity: Some(80),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["capacity"], 80);
    }

    #[test]
    fn patch_validates_capacity() {
        let patch = VenuePatch {
            capacity: Some(0),
            ..Default::default()
        };
        assert!(patch.validated().is_err());
    }

    #[test]
    fn serializes_nested_location_for_search() {
        let venue = create(draft()).unwrap();
        let json = serde_json::to_value(&venue).unwrap();
        assert_eq!(json["location"]["city"], "Austin");
        assert_eq!(json["capacity"], 120);
        let back: Venue = serde_json::from_value(json).unwrap();
        assert_eq!(back, venue);
    }
}

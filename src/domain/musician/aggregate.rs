//! Musician profile aggregate.
//!
//! A musician profile is owned by exactly one user account and is only
//! mutated through the profile handlers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_tags, require_min_chars, require_non_blank, MediaItem, MusicianId, Timestamp,
    UserId, ValidationError, MIN_PROFILE_TEXT_LENGTH,
};

use super::{AvailabilityWindow, EloRating, PerformanceRecord};

/// Validated input for a new musician profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicianDraft {
    pub name: String,
    pub genre: Vec<String>,
    pub bio: String,
    pub media_urls: Vec<MediaItem>,
    pub performance_history: Vec<PerformanceRecord>,
    pub availability: Vec<AvailabilityWindow>,
}

/// Musician aggregate.
///
/// # Invariants
///
/// - `name` is non-blank
/// - `bio` has at least 50 characters
/// - `genre` holds no duplicates
/// - `elo_rating` is positive and never supplied by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Musician {
    id: MusicianId,
    user_id: UserId,
    name: String,
    #[serde(default)]
    genre: Vec<String>,
    bio: String,
    #[serde(default)]
    media_urls: Vec<MediaItem>,
    #[serde(default)]
    performance_history: Vec<PerformanceRecord>,
    #[serde(default)]
    availability: Vec<AvailabilityWindow>,
    #[serde(default)]
    elo_rating: EloRating,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Musician {
    /// Creates a new profile with the default rating.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `TooShort` if the bio has fewer than 50 characters
    /// - media and availability validation failures
    pub fn create(
        id: MusicianId,
        user_id: UserId,
        draft: MusicianDraft,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = require_non_blank("name", &draft.name)?;
        let bio = validate_bio(&draft.bio)?;
        validate_media(&draft.media_urls)?;
        validate_availability(&draft.availability)?;

        Ok(Self {
            id,
            user_id,
            name,
            genre: normalize_tags(&draft.genre),
            bio,
            media_urls: draft.media_urls,
            performance_history: draft.performance_history,
            availability: draft.availability,
            elo_rating: EloRating::default(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MusicianId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genre(&self) -> &[String] {
        &self.genre
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn media_urls(&self) -> &[MediaItem] {
        &self.media_urls
    }

    pub fn performance_history(&self) -> &[PerformanceRecord] {
        &self.performance_history
    }

    pub fn availability(&self) -> &[AvailabilityWindow] {
        &self.availability
    }

    pub fn elo_rating(&self) -> EloRating {
        self.elo_rating
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given user owns this profile.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Applies a validated patch, leaving unspecified fields untouched.
    pub fn apply(&mut self, patch: &MusicianPatch, now: Timestamp) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(bio) = &patch.bio {
            self.bio = bio.clone();
        }
        if let Some(media) = &patch.media_urls {
            self.media_urls = media.clone();
        }
        if let Some(history) = &patch.performance_history {
            self.performance_history = history.clone();
        }
        if let Some(availability) = &patch.availability {
            self.availability = availability.clone();
        }
        self.updated_at = now;
    }
}

/// Field-level partial update of a musician profile.
///
/// Serializes to exactly the supplied fields, so it doubles as the partial
/// document sent to the store. The rating is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicianPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<MediaItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_history: Option<Vec<PerformanceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<AvailabilityWindow>>,
}

impl MusicianPatch {
    /// Validates supplied fields and normalizes them.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let name = self
            .name
            .map(|name| require_non_blank("name", &name))
            .transpose()?;
        let bio = self.bio.map(|bio| validate_bio(&bio)).transpose()?;
        if let Some(media) = &self.media_urls {
            validate_media(media)?;
        }
        if let Some(availability) = &self.availability {
            validate_availability(availability)?;
        }

        Ok(Self {
            name,
            genre: self.genre.map(normalize_tags),
            bio,
            media_urls: self.media_urls,
            performance_history: self.performance_history,
            availability: self.availability,
        })
    }

    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_bio(bio: &str) -> Result<String, ValidationError> {
    let bio = bio.trim();
    require_min_chars("bio", bio, MIN_PROFILE_TEXT_LENGTH)?;
    Ok(bio.to_string())
}

fn validate_media(media: &[MediaItem]) -> Result<(), ValidationError> {
    media.iter().try_for_each(MediaItem::validate)
}

fn validate_availability(windows: &[AvailabilityWindow]) -> Result<(), ValidationError> {
    windows.iter().try_for_each(AvailabilityWindow::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MediaType;

    fn long_bio() -> String {
        "Five-piece brass band playing New Orleans second-line classics.".to_string()
    }

    fn draft() -> MusicianDraft {
        MusicianDraft {
            name: "The Brass Tacks".to_string(),
            bio: long_bio(),
            ..Default::default()
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse_iso("2024-05-01T12:00:00Z").unwrap()
    }

    fn create(draft: MusicianDraft) -> Result<Musician, ValidationError> {
        Musician::create(MusicianId::new(), UserId::new("user-1").unwrap(), draft, now())
    }

    #[test]
    fn create_seeds_defaults() {
        let musician = create(draft()).unwrap();
        assert_eq!(musician.elo_rating().value(), 1000);
        assert!(musician.genre().is_empty());
        assert!(musician.media_urls().is_empty());
        assert!(musician.performance_history().is_empty());
        assert!(musician.availability().is_empty());
        assert_eq!(musician.created_at(), &now());
        assert_eq!(musician.updated_at(), &now());
    }

    #[test]
    fn create_rejects_blank_name() {
        let result = create(MusicianDraft {
            name: "  ".to_string(),
            ..draft()
        });
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn create_rejects_short_bio() {
        let result = create(MusicianDraft {
            bio: "short".to_string(),
            ..draft()
        });
        assert!(matches!(result, Err(ValidationError::TooShort { min: 50, .. })));
    }

    #[test]
    fn create_normalizes_genres() {
        let musician = create(MusicianDraft {
            genre: vec!["Jazz".to_string(), "jazz ".to_string(), "Funk".to_string()],
            ..draft()
        })
        .unwrap();
        assert_eq!(musician.genre(), ["jazz", "funk"]);
    }

    #[test]
    fn create_validates_media() {
        let result = create(MusicianDraft {
            media_urls: vec![MediaItem {
                media_type: MediaType::Video,
                url: String::new(),
                caption: None,
            }],
            ..draft()
        });
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case_document() {
        let musician = create(draft()).unwrap();
        let json = serde_json::to_value(&musician).unwrap();
        assert_eq!(json["eloRating"], 1000);
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00.000Z");
        assert!(json["performanceHistory"].as_array().unwrap().is_empty());

        let back: Musician = serde_json::from_value(json).unwrap();
        assert_eq!(back, musician);
    }

    #[test]
    fn patch_rejects_short_bio() {
        let patch = MusicianPatch {
            bio: Some("too short".to_string()),
            ..Default::default()
        };
        assert!(patch.validated().is_err());
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = MusicianPatch {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["name"], "New Name");
    }

    #[test]
    fn apply_leaves_unspecified_fields_untouched() {
        let mut musician = create(draft()).unwrap();
        let later = now().plus_secs(60);
        let patch = MusicianPatch {
            genre: Some(vec!["soul".to_string()]),
            ..Default::default()
        }
        .validated()
        .unwrap();

        musician.apply(&patch, later);

        assert_eq!(musician.genre(), ["soul"]);
        assert_eq!(musician.name(), "The Brass Tacks");
        assert_eq!(musician.bio(), long_bio());
        assert_eq!(musician.updated_at(), &later);
        assert_eq!(musician.created_at(), &now());
    }
}

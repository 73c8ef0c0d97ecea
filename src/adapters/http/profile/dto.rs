//! HTTP DTOs for profile endpoints.
//!
//! Request bodies are the application's typed requests; responses are
//! flattened views of the aggregates.

use serde::Serialize;

use crate::domain::foundation::{MediaItem, MusicianId, PaymentTerms, Timestamp, UserId, VenueId};
use crate::domain::musician::{AvailabilityWindow, Musician, PerformanceRecord};
use crate::domain::venue::{AvailabilitySlot, Location, Venue};

/// A musician profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicianResponse {
    pub id: MusicianId,
    pub user_id: UserId,
    pub name: String,
    pub genre: Vec<String>,
    pub bio: String,
    pub media_urls: Vec<MediaItem>,
    pub performance_history: Vec<PerformanceRecord>,
    pub availability: Vec<AvailabilityWindow>,
    pub elo_rating: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Musician> for MusicianResponse {
    fn from(m: Musician) -> Self {
        Self {
            id: *m.id(),
            user_id: m.user_id().clone(),
            name: m.name().to_string(),
            genre: m.genre().to_vec(),
            bio: m.bio().to_string(),
            media_urls: m.media_urls().to_vec(),
            performance_history: m.performance_history().to_vec(),
            availability: m.availability().to_vec(),
            elo_rating: m.elo_rating().value(),
            created_at: *m.created_at(),
            updated_at: *m.updated_at(),
        }
    }
}

/// A venue profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub id: VenueId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub media_urls: Vec<MediaItem>,
    pub payment_terms: PaymentTerms,
    pub availability: Vec<AvailabilitySlot>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Venue> for VenueResponse {
    fn from(v: Venue) -> Self {
        Self {
            id: *v.id(),
            user_id: v.user_id().clone(),
            name: v.name().to_string(),
            description: v.description().to_string(),
            location: v.location().clone(),
            capacity: v.capacity(),
            amenities: v.amenities().to_vec(),
            media_urls: v.media_urls().to_vec(),
            payment_terms: v.payment_terms().clone(),
            availability: v.availability().to_vec(),
            created_at: *v.created_at(),
            updated_at: *v.updated_at(),
        }
    }
}

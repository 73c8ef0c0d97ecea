//! Musician profile domain.

mod aggregate;
mod values;

pub use aggregate::{Musician, MusicianDraft, MusicianPatch};
pub use values::{AvailabilityWindow, EloRating, PerformanceRecord, DEFAULT_ELO_RATING};

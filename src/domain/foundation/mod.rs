//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the booking marketplace.

mod caller;
mod errors;
mod ids;
mod media;
mod payment_terms;
mod percentage;
mod state_machine;
mod text;
mod time_of_day;
mod timestamp;

pub use caller::{CallerContext, UserType};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, MusicianId, UserId, VenueId};
pub use media::{MediaItem, MediaType, MAX_CAPTION_LENGTH};
pub use payment_terms::{PaymentTerms, MAX_OTHER_TERMS_LENGTH};
pub use percentage::Percentage;
pub use state_machine::{StateMachine, TransitionRejected};
pub use text::{normalize_tags, require_min_chars, require_non_blank, MIN_PROFILE_TEXT_LENGTH};
pub use time_of_day::TimeOfDay;
pub use timestamp::Timestamp;

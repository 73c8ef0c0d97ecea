//! HTTP adapter for musician and venue profile endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{MusicianResponse, VenueResponse};
pub use handlers::{MusicianHandlers, VenueProfileHandlers};
pub use routes::{musician_routes, venue_profile_routes};

//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_musician, create_venue, get_musician, get_own_musician, get_own_venue, get_venue,
    update_musician, update_venue, MusicianHandlers, VenueProfileHandlers,
};

/// Creates the musician profile router.
pub fn musician_routes(handlers: MusicianHandlers) -> Router {
    Router::new()
        .route("/", post(create_musician))
        .route("/me", get(get_own_musician))
        .route("/:id", get(get_musician).patch(update_musician))
        .with_state(handlers)
}

/// Creates the venue profile router.
pub fn venue_profile_routes(handlers: VenueProfileHandlers) -> Router {
    Router::new()
        .route("/", post(create_venue))
        .route("/me", get(get_own_venue))
        .route("/:id", get(get_venue).patch(update_venue))
        .with_state(handlers)
}

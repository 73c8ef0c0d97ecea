//! HTTP adapter for venue search.

mod handlers;
mod routes;

pub use handlers::{SearchHandlers, VenueSearchResponse};
pub use routes::search_routes;

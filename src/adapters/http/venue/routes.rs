//! HTTP routes for venue search.

use axum::{routing::post, Router};

use super::handlers::{search_venues, SearchHandlers};

/// Creates the venue search router.
pub fn search_routes(handlers: SearchHandlers) -> Router {
    Router::new()
        .route("/search", post(search_venues))
        .with_state(handlers)
}

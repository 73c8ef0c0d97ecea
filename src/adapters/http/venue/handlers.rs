//! HTTP handler for venue search.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

use crate::adapters::http::error::search_error;
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::profile::VenueResponse;
use crate::application::handlers::venue::SearchVenuesHandler;
use crate::domain::venue::VenueSearchCriteria;

#[derive(Clone)]
pub struct SearchHandlers {
    pub search: Arc<SearchVenuesHandler>,
}

/// Search results in match order.
#[derive(Debug, Clone, Serialize)]
pub struct VenueSearchResponse {
    pub venues: Vec<VenueResponse>,
    pub total: usize,
}

/// POST /api/venues/search - Multi-criteria venue search
pub async fn search_venues(
    State(handlers): State<SearchHandlers>,
    Caller(_caller): Caller,
    Json(criteria): Json<VenueSearchCriteria>,
) -> Response {
    match handlers.search.handle(criteria).await {
        Ok(venues) => {
            let venues: Vec<VenueResponse> = venues.into_iter().map(Into::into).collect();
            let response = VenueSearchResponse {
                total: venues.len(),
                venues,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => search_error(e),
    }
}

//! GetVenueProfileHandler - Query handler for venue profiles.

use std::sync::Arc;

use crate::domain::foundation::{UserId, VenueId};
use crate::domain::profile::ProfileError;
use crate::domain::venue::Venue;
use crate::ports::VenueRepository;

/// Lookup key for a venue profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetVenueProfileQuery {
    ByUser(UserId),
    ById(VenueId),
}

/// Handler for reading venue profiles.
pub struct GetVenueProfileHandler {
    repository: Arc<dyn VenueRepository>,
}

impl GetVenueProfileHandler {
    pub fn new(repository: Arc<dyn VenueRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetVenueProfileQuery) -> Result<Option<Venue>, ProfileError> {
        let venue = match query {
            GetVenueProfileQuery::ByUser(user_id) => self.repository.find_by_user_id(&user_id).await?,
            GetVenueProfileQuery::ById(id) => self.repository.find_by_id(&id).await?,
        };
        Ok(venue)
    }
}

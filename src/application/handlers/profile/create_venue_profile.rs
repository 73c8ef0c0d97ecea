//! CreateVenueProfileHandler - Command handler for new venue profiles.

use std::sync::Arc;

use crate::domain::foundation::{CallerContext, UserType, VenueId};
use crate::domain::profile::ProfileError;
use crate::domain::venue::Venue;
use crate::ports::{Clock, VenueRepository};

use super::{ensure_user_type, CreateVenueProfileRequest};

/// Command to create the caller's venue profile.
#[derive(Debug, Clone)]
pub struct CreateVenueProfileCommand {
    pub request: CreateVenueProfileRequest,
}

/// Handler for creating venue profiles.
pub struct CreateVenueProfileHandler {
    repository: Arc<dyn VenueRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateVenueProfileHandler {
    pub fn new(repository: Arc<dyn VenueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CreateVenueProfileCommand,
        caller: &CallerContext,
    ) -> Result<Venue, ProfileError> {
        ensure_user_type(caller, UserType::Venue)?;

        let draft = cmd.request.into_draft()?;
        let venue = Venue::create(VenueId::new(), caller.user_id.clone(), draft, self.clock.now())?;

        self.repository.create(&venue).await?;

        tracing::info!(
            venue_id = %venue.id(),
            user_id = %caller.user_id,
            city = %venue.location().city,
            "Venue profile created"
        );

        Ok(venue)
    }
}

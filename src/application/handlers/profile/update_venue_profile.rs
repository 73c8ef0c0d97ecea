//! UpdateVenueProfileHandler - Command handler for partial venue updates.

use std::sync::Arc;

use crate::domain::foundation::{CallerContext, ErrorCode, UserType, VenueId};
use crate::domain::profile::ProfileError;
use crate::domain::venue::Venue;
use crate::ports::{Clock, VenueRepository};

use super::UpdateVenueProfileRequest;

/// Command to update a venue profile owned by the caller.
#[derive(Debug, Clone)]
pub struct UpdateVenueProfileCommand {
    pub venue_id: VenueId,
    pub request: UpdateVenueProfileRequest,
}

/// Handler for updating venue profiles.
pub struct UpdateVenueProfileHandler {
    repository: Arc<dyn VenueRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateVenueProfileHandler {
    pub fn new(repository: Arc<dyn VenueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns the profile as it reads after the update.
    pub async fn handle(
        &self,
        cmd: UpdateVenueProfileCommand,
        caller: &CallerContext,
    ) -> Result<Venue, ProfileError> {
        let not_found = || ProfileError::not_found(UserType::Venue, cmd.venue_id);

        let mut venue = self
            .repository
            .find_by_id(&cmd.venue_id)
            .await?
            .ok_or_else(not_found)?;

        if !venue.is_owned_by(&caller.user_id) {
            return Err(ProfileError::Forbidden);
        }

        let patch = cmd.request.validated()?;
        if patch.is_empty() {
            return Ok(venue);
        }

        // Apply locally first so the venue type is folded into the amenities
        // that get written.
        let now = self.clock.now();
        let applied = venue.apply(patch, now);
        self.repository
            .update(&cmd.venue_id, &applied, now)
            .await
            .map_err(|e| match e.code {
                ErrorCode::VenueNotFound => not_found(),
                _ => e.into(),
            })?;

        tracing::info!(
            venue_id = %cmd.venue_id,
            user_id = %caller.user_id,
            "Venue profile updated"
        );

        Ok(venue)
    }
}

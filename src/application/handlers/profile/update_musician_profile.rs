//! UpdateMusicianProfileHandler - Command handler for partial profile updates.

use std::sync::Arc;

use crate::domain::foundation::{CallerContext, ErrorCode, MusicianId, UserType};
use crate::domain::musician::Musician;
use crate::domain::profile::ProfileError;
use crate::ports::{Clock, MusicianRepository};

use super::UpdateMusicianProfileRequest;

/// Command to update a musician profile owned by the caller.
#[derive(Debug, Clone)]
pub struct UpdateMusicianProfileCommand {
    pub musician_id: MusicianId,
    pub request: UpdateMusicianProfileRequest,
}

/// Handler for updating musician profiles.
pub struct UpdateMusicianProfileHandler {
    repository: Arc<dyn MusicianRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateMusicianProfileHandler {
    pub fn new(repository: Arc<dyn MusicianRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns the profile as it reads after the update.
    pub async fn handle(
        &self,
        cmd: UpdateMusicianProfileCommand,
        caller: &CallerContext,
    ) -> Result<Musician, ProfileError> {
        let not_found = || ProfileError::not_found(UserType::Musician, cmd.musician_id);

        let mut musician = self
            .repository
            .find_by_id(&cmd.musician_id)
            .await?
            .ok_or_else(not_found)?;

        if !musician.is_owned_by(&caller.user_id) {
            return Err(ProfileError::Forbidden);
        }

        let patch = cmd.request.validated()?;
        if patch.is_empty() {
            return Ok(musician);
        }

        let now = self.clock.now();
        self.repository
            .update(&cmd.musician_id, &patch, now)
            .await
            .map_err(|e| match e.code {
                ErrorCode::MusicianNotFound => not_found(),
                _ => e.into(),
            })?;
        musician.apply(&patch, now);

        tracing::info!(
            musician_id = %cmd.musician_id,
            user_id = %caller.user_id,
            "Musician profile updated"
        );

        Ok(musician)
    }
}

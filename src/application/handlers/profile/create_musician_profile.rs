//! CreateMusicianProfileHandler - Command handler for new musician profiles.

use std::sync::Arc;

use crate::domain::foundation::{CallerContext, MusicianId, UserType};
use crate::domain::musician::Musician;
use crate::domain::profile::ProfileError;
use crate::ports::{Clock, MusicianRepository};

use super::{ensure_user_type, CreateMusicianProfileRequest};

/// Command to create the caller's musician profile.
#[derive(Debug, Clone)]
pub struct CreateMusicianProfileCommand {
    pub request: CreateMusicianProfileRequest,
}

/// Handler for creating musician profiles.
pub struct CreateMusicianProfileHandler {
    repository: Arc<dyn MusicianRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateMusicianProfileHandler {
    pub fn new(repository: Arc<dyn MusicianRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CreateMusicianProfileCommand,
        caller: &CallerContext,
    ) -> Result<Musician, ProfileError> {
        ensure_user_type(caller, UserType::Musician)?;

        let draft = cmd.request.into_draft()?;
        let musician = Musician::create(
            MusicianId::new(),
            caller.user_id.clone(),
            draft,
            self.clock.now(),
        )?;

        self.repository.create(&musician).await?;

        tracing::info!(
            musician_id = %musician.id(),
            user_id = %caller.user_id,
            "Musician profile created"
        );

        Ok(musician)
    }
}

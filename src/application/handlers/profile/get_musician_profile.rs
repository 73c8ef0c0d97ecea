//! GetMusicianProfileHandler - Query handler for musician profiles.

use std::sync::Arc;

use crate::domain::foundation::{MusicianId, UserId};
use crate::domain::musician::Musician;
use crate::domain::profile::ProfileError;
use crate::ports::MusicianRepository;

/// Lookup key for a musician profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetMusicianProfileQuery {
    ByUser(UserId),
    ById(MusicianId),
}

/// Handler for reading musician profiles. Profiles are public; an absent
/// profile is `None`, not an error.
pub struct GetMusicianProfileHandler {
    repository: Arc<dyn MusicianRepository>,
}

impl GetMusicianProfileHandler {
    pub fn new(repository: Arc<dyn MusicianRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetMusicianProfileQuery,
    ) -> Result<Option<Musician>, ProfileError> {
        let musician = match query {
            GetMusicianProfileQuery::ByUser(user_id) => {
                self.repository.find_by_user_id(&user_id).await?
            }
            GetMusicianProfileQuery::ById(id) => self.repository.find_by_id(&id).await?,
        };
        Ok(musician)
    }
}

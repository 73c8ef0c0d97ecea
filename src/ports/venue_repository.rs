//! Venue repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId, VenueId};
use crate::domain::venue::{Venue, VenuePatch};

/// Repository port for venue profiles.
///
/// Implementations must guarantee at most one venue profile per user,
/// atomically, even under concurrent creation. Searching is not part of this
/// port; the search engine queries the document store directly.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Saves a new profile.
    ///
    /// # Errors
    ///
    /// - `ProfileAlreadyExists` if the user already owns a venue profile
    async fn create(&self, venue: &Venue) -> Result<(), DomainError>;

    /// Finds a profile by id.
    async fn find_by_id(&self, id: &VenueId) -> Result<Option<Venue>, DomainError>;

    /// Finds the profile owned by a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Venue>, DomainError>;

    /// Writes only the fields present in the patch plus `updatedAt`.
    ///
    /// # Errors
    ///
    /// - `VenueNotFound` if the profile does not exist
    async fn update(
        &self,
        id: &VenueId,
        patch: &VenuePatch,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn VenueRepository) {}
    }
}

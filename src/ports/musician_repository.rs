//! Musician repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MusicianId, Timestamp, UserId};
use crate::domain::musician::{Musician, MusicianPatch};

/// Repository port for musician profiles.
///
/// Implementations must guarantee at most one musician profile per user,
/// atomically, even under concurrent creation.
#[async_trait]
pub trait MusicianRepository: Send + Sync {
    /// Saves a new profile.
    ///
    /// # Errors
    ///
    /// - `ProfileAlreadyExists` if the user already owns a musician profile
    /// - `DatabaseError` / `StoreUnavailable` on persistence failure
    async fn create(&self, musician: &Musician) -> Result<(), DomainError>;

    /// Finds a profile by id.
    async fn find_by_id(&self, id: &MusicianId) -> Result<Option<Musician>, DomainError>;

    /// Finds the profile owned by a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Musician>, DomainError>;

    /// Writes only the fields present in the patch plus `updatedAt`.
    ///
    /// # Errors
    ///
    /// - `MusicianNotFound` if the profile does not exist
    async fn update(
        &self,
        id: &MusicianId,
        patch: &MusicianPatch,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn musician_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MusicianRepository) {}
    }
}

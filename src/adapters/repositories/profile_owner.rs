//! Profile ownership markers.
//!
//! The document store only offers single-document atomicity, so "one profile
//! per user" is enforced with an insert-only marker document keyed by
//! `(user type, user id)`. The marker is written before the profile; a second
//! creation attempt loses the insert race and fails.

use serde_json::json;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, UserType};
use crate::ports::{collections, DocumentStore, StoreError};

fn marker_id(user_type: UserType, user_id: &UserId) -> String {
    format!("{}:{}", user_type, user_id)
}

/// Claims the profile slot for a user.
///
/// # Errors
///
/// - `ProfileAlreadyExists` if the slot is taken
pub(super) async fn claim(
    store: &dyn DocumentStore,
    user_type: UserType,
    user_id: &UserId,
    profile_id: &str,
) -> Result<(), DomainError> {
    let id = marker_id(user_type, user_id);
    let marker = json!({
        "userType": user_type,
        "userId": user_id,
        "profileId": profile_id,
    });
    let doc = marker.as_object().cloned().unwrap_or_default();

    match store.create(collections::PROFILE_OWNERS, &id, doc).await {
        Ok(()) => Ok(()),
        Err(StoreError::AlreadyExists { .. }) => Err(DomainError::new(
            ErrorCode::ProfileAlreadyExists,
            format!("User {} already has a {} profile", user_id, user_type),
        )
        .with_detail("user_type", user_type.as_str())),
        Err(e) => Err(e.into()),
    }
}

/// Releases a claim after the profile write failed. Best effort.
pub(super) async fn release(store: &dyn DocumentStore, user_type: UserType, user_id: &UserId) {
    let id = marker_id(user_type, user_id);
    if let Err(e) = store.delete(collections::PROFILE_OWNERS, &id).await {
        tracing::warn!(
            user_id = %user_id,
            user_type = %user_type,
            error = %e,
            "Failed to release profile claim"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDocumentStore;

    #[tokio::test]
    async fn second_claim_fails_until_released() {
        let store = InMemoryDocumentStore::new();
        let user = UserId::new("u1").unwrap();

        claim(&store, UserType::Musician, &user, "p1").await.unwrap();
        let err = claim(&store, UserType::Musician, &user, "p2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileAlreadyExists);

        // Claims are per user type.
        claim(&store, UserType::Venue, &user, "v1").await.unwrap();

        release(&store, UserType::Musician, &user).await;
        claim(&store, UserType::Musician, &user, "p3").await.unwrap();
    }
}

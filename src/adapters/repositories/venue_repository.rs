//! VenueRepository over the document store.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, UserType, VenueId};
use crate::domain::venue::{Venue, VenuePatch};
use crate::ports::{
    collections, from_document, to_document, DocumentQuery, DocumentStore, Predicate, StoreError,
    VenueRepository,
};

use super::profile_owner;

/// Document-backed implementation of [`VenueRepository`].
#[derive(Clone)]
pub struct DocumentVenueRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentVenueRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VenueRepository for DocumentVenueRepository {
    async fn create(&self, venue: &Venue) -> Result<(), DomainError> {
        let id = venue.id().to_string();
        let doc = to_document(venue)?;

        profile_owner::claim(self.store.as_ref(), UserType::Venue, venue.user_id(), &id).await?;

        if let Err(e) = self.store.create(collections::VENUES, &id, doc).await {
            profile_owner::release(self.store.as_ref(), UserType::Venue, venue.user_id()).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &VenueId) -> Result<Option<Venue>, DomainError> {
        let doc = self.store.get(collections::VENUES, &id.to_string()).await?;
        Ok(doc.map(from_document).transpose()?)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Venue>, DomainError> {
        let query = DocumentQuery::new()
            .filter(Predicate::eq("userId", user_id.as_str()))
            .limit(1);
        let docs = self.store.query(collections::VENUES, &query).await?;
        Ok(docs.into_iter().next().map(from_document).transpose()?)
    }

    async fn update(
        &self,
        id: &VenueId,
        patch: &VenuePatch,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut doc = to_document(patch)?;
        doc.insert("updatedAt".to_string(), Value::String(updated_at.to_iso_string()));

        match self
            .store
            .update(collections::VENUES, &id.to_string(), doc)
            .await
        {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => Err(DomainError::new(
                ErrorCode::VenueNotFound,
                format!("Venue not found: {}", id),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

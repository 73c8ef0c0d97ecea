//! MusicianRepository over the document store.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, MusicianId, Timestamp, UserId, UserType};
use crate::domain::musician::{Musician, MusicianPatch};
use crate::ports::{
    collections, from_document, to_document, DocumentQuery, DocumentStore, MusicianRepository,
    Predicate, StoreError,
};

use super::profile_owner;

/// Document-backed implementation of [`MusicianRepository`].
#[derive(Clone)]
pub struct DocumentMusicianRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentMusicianRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MusicianRepository for DocumentMusicianRepository {
    async fn create(&self, musician: &Musician) -> Result<(), DomainError> {
        let id = musician.id().to_string();
        let doc = to_document(musician)?;

        profile_owner::claim(
            self.store.as_ref(),
            UserType::Musician,
            musician.user_id(),
            &id,
        )
        .await?;

        if let Err(e) = self.store.create(collections::MUSICIANS, &id, doc).await {
            profile_owner::release(self.store.as_ref(), UserType::Musician, musician.user_id())
                .await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MusicianId) -> Result<Option<Musician>, DomainError> {
        let doc = self
            .store
            .get(collections::MUSICIANS, &id.to_string())
            .await?;
        Ok(doc.map(from_document).transpose()?)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Musician>, DomainError> {
        let query = DocumentQuery::new()
            .filter(Predicate::eq("userId", user_id.as_str()))
            .limit(1);
        let docs = self.store.query(collections::MUSICIANS, &query).await?;
        Ok(docs.into_iter().next().map(from_document).transpose()?)
    }

    async fn update(
        &self,
        id: &MusicianId,
        patch: &MusicianPatch,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut doc = to_document(patch)?;
        doc.insert("updatedAt".to_string(), Value::String(updated_at.to_iso_string()));

        match self
            .store
            .update(collections::MUSICIANS, &id.to_string(), doc)
            .await
        {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => Err(DomainError::new(
                ErrorCode::MusicianNotFound,
                format!("Musician not found: {}", id),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

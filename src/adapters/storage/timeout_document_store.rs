//! Timeout decorator for any DocumentStore.
//!
//! Bounds every store call. An expired call surfaces as
//! `StoreError::Unavailable`; the underlying operation may still complete,
//! which is safe because every write is a single-document atomic operation.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::{
    Document, DocumentQuery, DocumentStore, Predicate, QueryCapabilities, StoreError,
};

/// Wraps a store and fails calls that exceed `timeout`.
#[derive(Clone)]
pub struct TimeoutDocumentStore {
    inner: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl TimeoutDocumentStore {
    pub fn new(inner: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Document store call timed out"
                );
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {}ms",
                    operation,
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl DocumentStore for TimeoutDocumentStore {
    fn capabilities(&self) -> QueryCapabilities {
        self.inner.capabilities()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.bounded("get", self.inner.get(collection, id)).await
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        self.bounded("query", self.inner.query(collection, query)).await
    }

    async fn put(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.bounded("put", self.inner.put(collection, id, doc)).await
    }

    async fn create(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.bounded("create", self.inner.create(collection, id, doc))
            .await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError> {
        self.bounded("update", self.inner.update(collection, id, patch))
            .await
    }

    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        preconditions: &[Predicate],
        patch: Document,
    ) -> Result<(), StoreError> {
        self.bounded(
            "update_if",
            self.inner.update_if(collection, id, preconditions, patch),
        )
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.bounded("delete", self.inner.delete(collection, id)).await
    }
}

//! In-memory document store.
//!
//! Keeps collections in a `tokio` `RwLock`. Insertion order is tracked so
//! unsorted queries return documents in the order they were first written,
//! like most document databases do for small collections.
//!
//! Capabilities are configurable so tests can emulate a store with
//! restricted query support; queries beyond them are rejected exactly as a
//! real store would reject them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{
    Document, DocumentQuery, DocumentStore, Predicate, QueryCapabilities, StoreError,
};

#[derive(Debug, Default)]
struct Collection {
    docs: HashMap<String, Entry>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    doc: Document,
}

impl Collection {
    fn insert(&mut self, id: &str, doc: Document) {
        match self.docs.get_mut(id) {
            Some(entry) => entry.doc = doc,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.docs.insert(id.to_string(), Entry { seq, doc });
            }
        }
    }
}

/// In-memory implementation of [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
    capabilities: QueryCapabilities,
}

impl InMemoryDocumentStore {
    /// Creates a store that evaluates any query natively.
    pub fn new() -> Self {
        Self::with_capabilities(QueryCapabilities::full())
    }

    /// Creates a store advertising (and enforcing) the given capabilities.
    pub fn with_capabilities(capabilities: QueryCapabilities) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            capabilities,
        }
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, |c| c.docs.len())
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn merge(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn capabilities(&self) -> QueryCapabilities {
        self.capabilities
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.docs.get(id))
            .map(|entry| entry.doc.clone()))
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        self.capabilities
            .admit(query)
            .map_err(StoreError::QueryRejected)?;

        let collections = self.collections.read().await;
        let Some(coll) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Entry> = coll
            .docs
            .values()
            .filter(|entry| query.matches(&entry.doc))
            .collect();
        matched.sort_by_key(|entry| entry.seq);
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| sort.compare(&a.doc, &b.doc));
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched.into_iter().map(|entry| entry.doc.clone()).collect())
    }

    async fn put(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, doc);
        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let coll = collections.entry(collection.to_string()).or_default();
        if coll.docs.contains_key(id) {
            return Err(StoreError::already_exists(collection, id));
        }
        coll.insert(id, doc);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError> {
        self.update_if(collection, id, &[], patch).await
    }

    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        preconditions: &[Predicate],
        patch: Document,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .and_then(|c| c.docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        if !preconditions.iter().all(|p| p.matches(&entry.doc)) {
            return Err(StoreError::precondition_failed(collection, id));
        }
        merge(&mut entry.doc, patch);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(coll) = collections.get_mut(collection) {
            coll.docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Predicate, SortSpec};
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn get_returns_none_for_missing() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.get("venues", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_rejects_existing_id() {
        let store = InMemoryDocumentStore::new();
        store.create("c", "1", doc(json!({"a": 1}))).await.unwrap();
        let err = store.create("c", "1", doc(json!({"a": 2}))).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        assert_eq!(store.get("c", "1").await.unwrap().unwrap()["a"], 1);
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = InMemoryDocumentStore::new();
        store
            .put("c", "1", doc(json!({"a": 1, "b": {"x": 1}})))
            .await
            .unwrap();
        store
            .update("c", "1", doc(json!({"b": {"y": 2}, "c": 3})))
            .await
            .unwrap();

        let stored = store.get("c", "1").await.unwrap().unwrap();
        assert_eq!(Value::Object(stored), json!({"a": 1, "b": {"y": 2}, "c": 3}));
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let store = InMemoryDocumentStore::new();
        let err = store.update("c", "1", Document::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_if_checks_preconditions() {
        let store = InMemoryDocumentStore::new();
        store
            .put("c", "1", doc(json!({"status": "pending", "revision": 0})))
            .await
            .unwrap();

        let stale = [Predicate::eq("revision", 1)];
        let err = store
            .update_if("c", "1", &stale, doc(json!({"status": "accepted"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PreconditionFailed { .. }));

        let fresh = [Predicate::eq("status", "pending"), Predicate::eq("revision", 0)];
        store
            .update_if("c", "1", &fresh, doc(json!({"status": "accepted", "revision": 1})))
            .await
            .unwrap();
        assert_eq!(store.get("c", "1").await.unwrap().unwrap()["status"], "accepted");
    }

    #[tokio::test]
    async fn unsorted_query_keeps_insertion_order() {
        let store = InMemoryDocumentStore::new();
        for (id, n) in [("z", 3), ("a", 1), ("m", 2)] {
            store.put("c", id, doc(json!({"n": n}))).await.unwrap();
        }
        // Re-writing keeps the original position.
        store.put("c", "z", doc(json!({"n": 30}))).await.unwrap();

        let all = store.query("c", &DocumentQuery::new()).await.unwrap();
        let ns: Vec<i64> = all.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![30, 1, 2]);
    }

    #[tokio::test]
    async fn query_filters_sorts_and_limits() {
        let store = InMemoryDocumentStore::new();
        for (id, capacity) in [("a", 50), ("b", 120), ("c", 300), ("d", 500)] {
            store
                .put("venues", id, doc(json!({"capacity": capacity})))
                .await
                .unwrap();
        }
        let query = DocumentQuery::new()
            .filter(Predicate::gte("capacity", 100))
            .order_by(SortSpec::desc("capacity"))
            .limit(2);

        let found = store.query("venues", &query).await.unwrap();
        let caps: Vec<i64> = found.iter().map(|d| d["capacity"].as_i64().unwrap()).collect();
        assert_eq!(caps, vec![500, 300]);
    }

    #[tokio::test]
    async fn restricted_store_rejects_unsupported_queries() {
        let store = InMemoryDocumentStore::with_capabilities(QueryCapabilities::restricted());
        let query = DocumentQuery::new()
            .filter(Predicate::array_contains("amenities", "stage"))
            .filter(Predicate::array_contains("amenities", "bar"));
        let err = store.query("venues", &query).await.unwrap_err();
        assert!(matches!(err, StoreError::QueryRejected(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        store.put("c", "1", Document::new()).await.unwrap();
        store.delete("c", "1").await.unwrap();
        store.delete("c", "1").await.unwrap();
        assert_eq!(store.count("c").await, 0);
    }
}

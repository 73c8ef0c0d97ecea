//! Document store port.
//!
//! Abstracts a schemaless, per-document transactional store holding JSON
//! object documents grouped into collections. Repositories and the venue
//! search engine are written against this port only.
//!
//! # Query capabilities
//!
//! Stores differ in which predicate combinations they can evaluate natively.
//! Each store advertises a [`QueryCapabilities`] value; callers must not send
//! a query the store does not admit, and stores reject such queries with
//! [`StoreError::QueryRejected`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Well-known collection names.
pub mod collections {
    pub const MUSICIANS: &str = "musicians";
    pub const VENUES: &str = "venues";
    pub const BOOKINGS: &str = "bookings";
    /// One marker per `(user type, user id)` guarding profile uniqueness.
    pub const PROFILE_OWNERS: &str = "profile_owners";
}

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    /// The field is an array containing the value.
    ArrayContains,
}

impl FilterOp {
    pub fn is_range(&self) -> bool {
        matches!(self, FilterOp::Gte | FilterOp::Lte)
    }
}

/// A single filter on a (possibly dotted) field path.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::ArrayContains, value)
    }

    /// Evaluates the predicate against a document.
    ///
    /// A document missing the field never matches, and range comparisons
    /// between values of different JSON types never match.
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = field_value(doc, &self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => values_equal(actual, &self.value),
            FilterOp::Gte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::ArrayContains => actual
                .as_array()
                .is_some_and(|items| items.iter().any(|item| values_equal(item, &self.value))),
        }
    }
}

/// Ordering of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Compares two documents by the sort field. Documents missing the field
    /// sort after those that have it, in either direction.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match (field_value(a, &self.field), field_value(b, &self.field)) {
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y).unwrap_or(Ordering::Equal);
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A conjunctive query over one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub predicates: Vec<Predicate>,
    pub sort: Option<SortSpec>,
    pub limit: Option<usize>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the document satisfies every predicate.
    pub fn matches(&self, doc: &Document) -> bool {
        self.predicates.iter().all(|p| p.matches(doc))
    }
}

/// What a store can evaluate natively in one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCapabilities {
    /// Maximum number of distinct fields carrying range predicates.
    /// `None` means unlimited.
    pub max_range_fields: Option<usize>,
    /// Maximum number of array-contains predicates.
    pub max_array_contains: usize,
    /// When a query has a range predicate, its ordering must be on that same
    /// field.
    pub sort_must_match_range_field: bool,
}

impl QueryCapabilities {
    /// A store that evaluates any conjunction and ordering.
    pub fn full() -> Self {
        Self {
            max_range_fields: None,
            max_array_contains: usize::MAX,
            sort_must_match_range_field: false,
        }
    }

    /// Firestore-style limits: one range field, one array-contains, and
    /// ordering tied to the range field.
    pub fn restricted() -> Self {
        Self {
            max_range_fields: Some(1),
            max_array_contains: 1,
            sort_must_match_range_field: true,
        }
    }

    /// Checks a query against these capabilities.
    ///
    /// # Errors
    ///
    /// Returns a description of the first limit the query exceeds.
    pub fn admit(&self, query: &DocumentQuery) -> Result<(), String> {
        let mut range_fields: Vec<&str> = query
            .predicates
            .iter()
            .filter(|p| p.op.is_range())
            .map(|p| p.field.as_str())
            .collect();
        range_fields.sort_unstable();
        range_fields.dedup();

        if let Some(max) = self.max_range_fields {
            if range_fields.len() > max {
                return Err(format!(
                    "range filters on {} fields, at most {} allowed",
                    range_fields.len(),
                    max
                ));
            }
        }

        let array_contains = query
            .predicates
            .iter()
            .filter(|p| p.op == FilterOp::ArrayContains)
            .count();
        if array_contains > self.max_array_contains {
            return Err(format!(
                "{} array-contains filters, at most {} allowed",
                array_contains, self.max_array_contains
            ));
        }

        if self.sort_must_match_range_field {
            if let (Some(sort), Some(range_field)) = (&query.sort, range_fields.first()) {
                if sort.field != *range_field {
                    return Err(format!(
                        "ordering on '{}' must match range field '{}'",
                        sort.field, range_field
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for QueryCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// Document store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("Document {collection}/{id} already exists")]
    AlreadyExists { collection: String, id: String },

    #[error("Precondition failed for {collection}/{id}")]
    PreconditionFailed { collection: String, id: String },

    #[error("Query rejected: {0}")]
    QueryRejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: &str, id: &str) -> Self {
        StoreError::AlreadyExists {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn precondition_failed(collection: &str, id: &str) -> Self {
        StoreError::PreconditionFailed {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::NotFound { .. } => ErrorCode::InternalError,
            StoreError::AlreadyExists { .. } => ErrorCode::ProfileAlreadyExists,
            StoreError::PreconditionFailed { .. } => ErrorCode::ConcurrentModification,
            StoreError::QueryRejected(_) => ErrorCode::QueryRejected,
            StoreError::Unavailable(_) => ErrorCode::StoreUnavailable,
            StoreError::Malformed(_) => ErrorCode::DatabaseError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Port for document persistence.
///
/// Each call is atomic for the single document it touches. Writes never
/// span documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Native query capabilities of this store.
    fn capabilities(&self) -> QueryCapabilities;

    /// Reads a document. Returns `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Runs a conjunctive query. Without a sort the order is the store's
    /// default (insertion order where the store tracks it).
    ///
    /// # Errors
    ///
    /// - `QueryRejected` if the query exceeds [`DocumentStore::capabilities`]
    /// - `Unavailable` if the store cannot be reached
    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError>;

    /// Writes a document, replacing any existing one.
    async fn put(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Inserts a document only if the id is free.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a document with this id exists
    async fn create(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Shallow-merges `patch` into the stored document.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the document does not exist
    async fn update(&self, collection: &str, id: &str, patch: Document)
        -> Result<(), StoreError>;

    /// Shallow-merges `patch` only if the stored document satisfies every
    /// precondition, atomically.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the document does not exist
    /// - `PreconditionFailed` if any precondition does not hold
    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        preconditions: &[Predicate],
        patch: Document,
    ) -> Result<(), StoreError>;

    /// Deletes a document. Deleting an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Resolves a dotted path such as `location.city`.
pub fn field_value<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Orders two JSON scalars of the same kind. Returns `None` for mismatched
/// kinds and for arrays/objects.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Serializes a value into a [`Document`].
pub fn to_document<T: serde::Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Malformed(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(StoreError::Malformed(e.to_string())),
    }
}

/// Deserializes a [`Document`] into a value.
pub fn from_document<T: serde::de::DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Malformed(e.to_string()))
}

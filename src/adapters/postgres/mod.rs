//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! - `PostgresDocumentStore` - JSONB document table behind the `DocumentStore` port

mod document_store;

pub use document_store::PostgresDocumentStore;

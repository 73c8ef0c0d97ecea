//! Storage decorators wrapping any `DocumentStore`.

mod timeout_document_store;

pub use timeout_document_store::TimeoutDocumentStore;

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `DocumentStore` - Schemaless per-document store with capability-aware queries
//! - `MusicianRepository`, `VenueRepository`, `BookingRepository` - Aggregate persistence
//!
//! ## Environment Ports
//!
//! - `IdentityProvider` - Resolves bearer credentials into callers
//! - `Clock` - Current time

mod booking_repository;
mod clock;
mod document_store;
mod identity_provider;
mod musician_repository;
mod venue_repository;

pub use booking_repository::{BookingRepository, ExpectedState};
pub use clock::Clock;
pub use document_store::{
    collections, compare_values, field_value, from_document, to_document, Document,
    DocumentQuery, DocumentStore, FilterOp, Predicate, QueryCapabilities, SortSpec, StoreError,
};
pub use identity_provider::{IdentityError, IdentityProvider};
pub use musician_repository::MusicianRepository;
pub use venue_repository::VenueRepository;
